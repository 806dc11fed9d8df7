//! Elements CLI - keeps custom element registration tables in sync.
//!
//! Handles argument parsing, logging initialization and command dispatch.

use clap::Parser;
use elements_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command.unwrap_or_default() {
        cli::Command::Generate(overrides) => commands::generate_execute(&args.project, &overrides),
        cli::Command::Check(overrides) => commands::check_execute(&args.project, &overrides),
        cli::Command::Inspect(inspect) => commands::inspect_execute(&args.project, &inspect),
    };

    // Convert CLI errors to miette diagnostics for reporting
    result.map_err(error::cli_error_to_miette)
}
