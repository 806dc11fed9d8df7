//! Fixture projects written to a temporary directory.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub struct Project {
    _dir: TempDir,
    root: PathBuf,
}

impl Project {
    pub fn new(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        for (rel, contents) in files {
            let path = root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }
        Self { _dir: dir, root }
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
        fs::write(self.path(rel), contents).unwrap();
    }
}

pub const TSCONFIG: &str = r#"{
  // comments and trailing commas are allowed
  "compilerOptions": {
    "baseUrl": ".",
    "paths": { "@lib/*": ["src/*"] },
  },
  "include": ["src"],
}
"#;

pub const TEMPLATE: &str = r#"import { GridComponent } from '../grid/grid.component';
import { PivotGridComponent } from '../grid/pivot-grid.component';

export const registerComponents = [
    GridComponent,
    PivotGridComponent,
];
"#;

const GRID_BASE: &str = r#"import { Directive, Input } from '@angular/core';
import { Flag, Size } from './types';

@Directive({ selector: '[igxGridBase]' })
export class GridBaseDirective {
    @Input()
    public rowHeight: Size;

    @Input()
    public pinned: Flag;

    @Input()
    public set allowFiltering(value: boolean) {}
    public get allowFiltering(): boolean {
        return false;
    }

    public data: any[] = [];

    public sort(): void {}
}
"#;

const GRID: &str = r#"import {
    Component,
    ContentChild,
    ContentChildren,
    EventEmitter,
    Input as NgInput,
    Output,
    QueryList,
    TemplateRef,
    forwardRef,
} from '@angular/core';
import { ToolbarComponent } from '../toolbar/toolbar.component';
import { PaginatorComponent } from '@lib/paginator';
import { GridBaseDirective } from './grid-base';

/**
 * Data grid.
 */
@Component({ selector: 'igx-grid', template: '' })
export class GridComponent extends GridBaseDirective {
    @ContentChildren(ToolbarComponent, { descendants: true })
    public toolbar: QueryList<ToolbarComponent>;

    @ContentChild(forwardRef(() => PaginatorComponent))
    public paginator: PaginatorComponent;

    @ContentChildren(ToolbarComponent, { read: TemplateRef })
    public toolbarTemplates: QueryList<TemplateRef<any>>;

    @NgInput()
    public autoGenerate = false;

    @NgInput()
    public emptyTemplate: TemplateRef<any>;

    @Output()
    public rowAdded = new EventEmitter<any>();

    /** @hidden */
    public internalState: any;

    public get dataLength(): number {
        return 0;
    }

    public addRow(data: any): void {}

    private helper(): void {}
}
"#;

const PIVOT_GRID: &str = r#"import { Component } from '@angular/core';
import { GridBaseDirective } from './grid-base';

@Component({ selector: `igx-pivot-grid` })
export class PivotGridComponent extends GridBaseDirective {}
"#;

const COLUMN_GROUP: &str = r#"import { Component, ContentChildren, QueryList, forwardRef } from '@angular/core';

/**
 * Column groups nest inside grids and inside other column groups.
 *
 * @igxParent GridComponent, ColumnGroupComponent
 */
@Component({ template: '' })
export class ColumnGroupComponent {
    @ContentChildren(forwardRef(() => ColumnGroupComponent))
    public children: QueryList<ColumnGroupComponent>;
}
"#;

const TOOLBAR: &str = r#"import { Component, ContentChildren, QueryList, forwardRef } from '@angular/core';
import { UnrelatedDirective } from '../unrelated.directive';
import { ExporterComponent } from './exporter.component';

/**
 * Grid toolbar.
 *
 * @igxParent GridComponent, PivotGridComponent
 */
@Component({ selector: 'igx-grid-toolbar' })
export class ToolbarComponent {
    @ContentChildren(UnrelatedDirective)
    public helpers: QueryList<UnrelatedDirective>;

    @ContentChildren(forwardRef(() => ExporterComponent))
    public exporters: QueryList<ExporterComponent>;
}
"#;

const EXPORTER: &str = r#"import { Component } from '@angular/core';

/** @igxParent ToolbarComponent */
@Component({ selector: 'igx-grid-toolbar-exporter' })
export class ExporterComponent {}
"#;

const PAGINATOR: &str = r#"import { Component, forwardRef } from '@angular/core';

export abstract class PaginatorToken {}

/**
 * @igxParent GridComponent, PivotGridComponent, *
 */
@Component({
    selector: 'igx-paginator',
    providers: [{ provide: PaginatorToken, useExisting: forwardRef(() => PaginatorComponent) }],
})
export class PaginatorComponent {}
"#;

const UNRELATED: &str = r#"import { Component } from '@angular/core';

@Component({ selector: 'igx-unrelated' })
export class UnrelatedDirective {}
"#;

const SPEC_HOST: &str = r#"import { Component } from '@angular/core';

/** @igxParent GridComponent */
@Component({ selector: 'test-host' })
export class TestHostComponent {}
"#;

/// The grid library scenario: two registered grids, a toolbar with an
/// exporter, a paginator reached through a barrel, a self-nesting column
/// group and a directive nobody declares as a child.
pub fn grid_library() -> Project {
    Project::new(&[
        ("tsconfig.json", TSCONFIG),
        ("src/analyzer/elements.config.ts", TEMPLATE),
        ("src/grid/types.ts", "export type Flag = true | false;\nexport type Size = number;\n"),
        ("src/grid/grid-base.ts", GRID_BASE),
        ("src/grid/grid.component.ts", GRID),
        ("src/grid/grid.component.spec.ts", SPEC_HOST),
        ("src/grid/pivot-grid.component.ts", PIVOT_GRID),
        ("src/grid/column-group.component.ts", COLUMN_GROUP),
        ("src/toolbar/toolbar.component.ts", TOOLBAR),
        ("src/toolbar/exporter.component.ts", EXPORTER),
        ("src/paginator/paginator.component.ts", PAGINATOR),
        ("src/paginator/index.ts", "export * from './paginator.component';\n"),
        ("src/unrelated.directive.ts", UNRELATED),
    ])
}
