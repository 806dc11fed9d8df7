//! Elements CLI - regenerate custom element registration tables.
//!
//! This crate exposes the `elements` binary on top of `elements-analyzer`.
//!
//! - [`cli`] - Argument definitions
//! - [`commands`] - `generate`, `check` and `inspect`
//! - [`error`] - Error types with actionable hints
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Terminal status lines
//!
//! # Example
//!
//! ```rust,no_run
//! use elements_cli::{cli::{OverrideArgs, ProjectArgs}, commands, error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     commands::generate_execute(&ProjectArgs::default(), &OverrideArgs::default())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
