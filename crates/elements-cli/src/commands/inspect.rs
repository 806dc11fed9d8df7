//! Inspect command implementation.

use crate::cli::{InspectArgs, ProjectArgs};
use crate::commands::utils;
use crate::error::Result;
use crate::ui;
use elements_config::ConfigOverrides;
use serde::Serialize;

/// Execute the inspect command.
///
/// Prints raw component records, or with `--resolved` the registration
/// entries, as JSON on stdout. Status lines stay on stderr.
pub fn execute(project: &ProjectArgs, args: &InspectArgs) -> Result<()> {
    let analyzer = utils::load_analyzer(project, &ConfigOverrides::default())?;

    let (json, count) = if args.resolved {
        let table = analyzer.resolved()?;
        (to_json(&table, args.compact)?, table.len())
    } else {
        let records = analyzer.records()?;
        (to_json(&records, args.compact)?, records.len())
    };

    if count == 0 {
        ui::warning("No components found");
    }
    println!("{json}");
    Ok(())
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}
