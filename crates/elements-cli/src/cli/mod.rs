//! Command-line interface definition for the Elements analyzer.
//!
//! # Command Structure
//!
//! - `elements generate` - Regenerate the registration table (default)
//! - `elements check` - Fail when the generated table is out of date
//! - `elements inspect` - Print extracted component records as JSON

mod commands;
mod tests;

use clap::{Args, Parser};
use std::path::PathBuf;

pub use commands::{Command, InspectArgs, OverrideArgs};

/// Elements - custom element registration table generator
#[derive(Parser, Debug)]
#[command(
    name = "elements",
    version,
    about = "Generate custom element registration tables from component sources",
    long_about = "Reads a component library's TypeScript sources, works out which components\n\
                  nest inside which and writes the registration table below the marker line\n\
                  of the template module."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows every extracted component and every relation or query that was
    /// dropped during resolution.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Subcommand to execute; `generate` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Where the project lives and which analyzer config to read.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Analyzer config file instead of discovering elements.toml / package.json
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
