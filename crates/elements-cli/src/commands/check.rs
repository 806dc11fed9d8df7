//! Check command implementation.
//!
//! Computes the registration table exactly as `generate` would but never
//! writes it.

use crate::cli::{OverrideArgs, ProjectArgs};
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the check command.
///
/// # Errors
///
/// Returns [`CliError::Stale`] when the output module is missing or differs
/// from the freshly rendered one.
pub fn execute(project: &ProjectArgs, args: &OverrideArgs) -> Result<()> {
    let analyzer = utils::load_analyzer(project, &args.to_overrides())?;
    let module = analyzer.plan()?;
    let path = utils::display_path(&module.path, analyzer.root());

    if module.changed {
        ui::error(&format!("{path} is out of date"));
        return Err(CliError::Stale(module.path));
    }

    ui::success(&format!("{path} is up to date"));
    Ok(())
}
