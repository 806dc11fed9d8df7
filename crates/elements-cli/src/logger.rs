//! Logging infrastructure for the Elements CLI.
//!
//! Logs go to stderr so that `inspect` can keep stdout for JSON.
//!
//! # Example
//!
//! ```rust,no_run
//! use elements_cli::logger::init_logger;
//! use tracing::{debug, info};
//!
//! init_logger(false, false, false);
//!
//! info!("Collecting sources");
//! debug!("Extracting component: {}", "GridComponent");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Debug filter for `--verbose`.
pub const VERBOSE_FILTER: &str =
    "elements_analyzer=debug,elements_config=debug,elements_gen=debug,elements_cli=debug";

/// Filter for `--quiet`.
pub const QUIET_FILTER: &str = "error";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str =
    "elements_analyzer=info,elements_config=info,elements_gen=info,elements_cli=info";

/// Initialize the tracing subscriber.
///
/// Called once at the start of the program, before any logging occurs.
///
/// # Verbosity Levels
///
/// 1. `--verbose`: DEBUG for the elements crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`: custom filter
/// 4. Default: INFO for the elements crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(select_filter(verbose, quiet), no_color);
}

/// Initialize the logger with a custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn select_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global subscriber can only be installed once per process, so these
    // only exercise filter selection.

    #[test]
    fn verbose_wins_over_quiet() {
        let filter = select_filter(true, true);
        assert!(filter.to_string().to_lowercase().contains("elements_analyzer=debug"));
    }

    #[test]
    fn quiet_keeps_errors_only() {
        assert_eq!(select_filter(false, true).to_string().to_lowercase(), "error");
    }

    #[test]
    #[serial_test::serial]
    fn rust_log_is_honored_by_default() {
        unsafe {
            std::env::set_var("RUST_LOG", "elements_cli=trace");
        }
        let filter = select_filter(false, false);
        unsafe {
            std::env::remove_var("RUST_LOG");
        }
        assert_eq!(filter.to_string().to_lowercase(), "elements_cli=trace");
    }

    #[test]
    #[serial_test::serial]
    fn falls_back_to_info() {
        unsafe {
            std::env::remove_var("RUST_LOG");
        }
        let filter = select_filter(false, false).to_string().to_lowercase();
        assert!(filter.contains("elements_gen=info"));
    }
}
