//! Command implementations for the Elements CLI.
//!
//! - [`generate`] - Regenerate and write the registration table
//! - [`check`] - Fail when the registration table is stale
//! - [`inspect`] - Dump component records as JSON
//!
//! Each command provides an `execute` function taking the shared
//! [`ProjectArgs`](crate::cli::ProjectArgs) and its own arguments.

pub mod check;
pub mod generate;
pub mod inspect;
pub(crate) mod utils;

pub use check::execute as check_execute;
pub use generate::execute as generate_execute;
pub use inspect::execute as inspect_execute;
