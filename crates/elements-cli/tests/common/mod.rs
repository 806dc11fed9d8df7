//! A small card library written to a temporary directory.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub const TEMPLATE_PATH: &str = "src/analyzer/elements.config.ts";

pub const TEMPLATE: &str = r#"import { CardComponent } from '../card/card.component';

export const registerComponents = [
    CardComponent,
];
"#;

const CARD: &str = r#"import { Component, Input } from '@angular/core';

@Component({ selector: 'igx-card' })
export class CardComponent {
    @Input()
    public outlined = false;

    @Input()
    public elevation: number;
}
"#;

const CARD_HEADER: &str = r#"import { Component } from '@angular/core';

/** @igxParent CardComponent */
@Component({ selector: 'igx-card-header' })
export class CardHeaderComponent {}
"#;

const CHIP: &str = r#"import { Component } from '@angular/core';

@Component({ selector: 'igx-chip' })
export class ChipComponent {}
"#;

pub struct Project {
    _dir: TempDir,
    root: PathBuf,
}

impl Project {
    pub fn card_library() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let project = Self { _dir: dir, root };
        project.write("tsconfig.json", r#"{ "compilerOptions": {}, "include": ["src"] }"#);
        project.write(TEMPLATE_PATH, TEMPLATE);
        project.write("src/card/card.component.ts", CARD);
        project.write("src/card/card-header.component.ts", CARD_HEADER);
        project.write("src/chip.component.ts", CHIP);
        project
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap()
    }

    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    /// The `elements` binary running in the project root.
    pub fn elements(&self) -> Command {
        let mut cmd = Command::cargo_bin("elements").unwrap();
        cmd.current_dir(&self.root)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("ELEMENTS_TABLE_NAME")
            .env_remove("ELEMENTS_OUTPUT");
        cmd
    }
}
