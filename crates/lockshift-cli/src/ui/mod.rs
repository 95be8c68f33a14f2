//! Terminal output: status lines and the conversion summary.
//!
//! Everything here writes to stderr so `lockshift convert --stdout` can be
//! piped. Color follows `--no-color`, then `NO_COLOR`/`FORCE_COLOR`, then
//! terminal detection.
//!
//! ```no_run
//! use lockshift_cli::ui;
//!
//! ui::init(false, false);
//! ui::info("Reading pnpm-lock.yaml");
//! ui::success("Wrote package-lock.json");
//! ```

mod format;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{TreeSummary, format_duration, print_tree_summary};
pub use messages::{info, success, warning};

static QUIET: AtomicBool = AtomicBool::new(false);
static COLOR: AtomicBool = AtomicBool::new(true);

/// Set output preferences from the global flags. Call once from `main`.
pub fn init(quiet: bool, no_color: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
    COLOR.store(!no_color && should_use_color(), Ordering::Relaxed);
}

pub(crate) fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub(crate) fn color_enabled() -> bool {
    COLOR.load(Ordering::Relaxed)
}

/// Check if color output should be enabled for stderr.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_flag_disables_color() {
        init(false, true);
        assert!(!color_enabled());
        assert!(!is_quiet());
    }
}
