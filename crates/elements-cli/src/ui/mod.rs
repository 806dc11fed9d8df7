//! Terminal status lines.
//!
//! # Examples
//!
//! ```no_run
//! use elements_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Wrote src/analyzer/elements.config.ts");
//! ui::error("Registration table is out of date");
//! ```

mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use messages::{error, info, success, warning};

static COLORS: AtomicBool = AtomicBool::new(false);

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR, falls back to terminal detection.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Status lines go to stderr
    console::user_attended_stderr()
}

/// Decide once whether status lines are colored. Call early in `main`.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}
