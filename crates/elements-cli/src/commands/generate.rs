//! Generate command implementation.

use crate::cli::{OverrideArgs, ProjectArgs};
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the generate command.
///
/// 1. Merge the analyzer config layers with the CLI overrides
/// 2. Summarize the tsconfig file set and extract component records
/// 3. Resolve against the template's registered array
/// 4. Write the output module when its contents changed
///
/// # Errors
///
/// Configuration, template and I/O failures are fatal.
pub fn execute(project: &ProjectArgs, args: &OverrideArgs) -> Result<()> {
    let analyzer = utils::load_analyzer(project, &args.to_overrides())?;
    let module = analyzer.generate()?;
    let path = utils::display_path(&module.path, analyzer.root());

    if module.changed {
        ui::success(&format!("Wrote {path}"));
    } else {
        ui::info(&format!("{path} is up to date"));
    }
    Ok(())
}
