//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use miette::{Report, miette};

/// Convert CliError to a miette Report
///
/// Analyzer errors keep their own diagnostic codes and help text; everything
/// else is reported by message plus the hint from [`CliError::hint`].
pub fn cli_error_to_miette(err: CliError) -> Report {
    let hint = err.hint();
    match (err, hint) {
        (CliError::Analyzer(inner), None) => Report::new(inner),
        (CliError::Stale(path), Some(hint)) => miette!(
            code = "elements::stale",
            help = hint,
            "{}",
            CliError::Stale(path)
        ),
        (err, Some(hint)) => miette!(help = hint, "{}", err),
        (err, None) => miette!("{}", err),
    }
}
