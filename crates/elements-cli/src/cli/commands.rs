use clap::{Args, Subcommand};
use elements_config::ConfigOverrides;
use std::path::PathBuf;

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Regenerate the registration table
    ///
    /// Writes the output module only when its contents would change.
    Generate(OverrideArgs),

    /// Verify the registration table is up to date
    ///
    /// Computes the table without writing it and exits with a non-zero
    /// status when the output module differs. Intended for CI.
    Check(OverrideArgs),

    /// Print extracted component records as JSON
    Inspect(InspectArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Generate(OverrideArgs::default())
    }
}

/// Per-run overrides of the analyzer config
#[derive(Args, Debug, Clone, Default)]
pub struct OverrideArgs {
    /// Template module holding the registered component array
    #[arg(short, long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Output module (defaults to the template)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// tsconfig.json to use instead of discovering one
    #[arg(long, value_name = "FILE")]
    pub tsconfig: Option<PathBuf>,
}

impl OverrideArgs {
    pub fn to_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            template: self.template.clone(),
            output: self.output.clone(),
            tsconfig: self.tsconfig.clone(),
        }
    }
}

/// Arguments for the inspect command
#[derive(Args, Debug, Clone, Default)]
pub struct InspectArgs {
    /// Print the resolved registration entries instead of raw records
    ///
    /// Resolution needs the template, so this reads the registered array.
    #[arg(long)]
    pub resolved: bool,

    /// Single-line JSON
    #[arg(long)]
    pub compact: bool,
}
