//! Status message functions for terminal output.

use owo_colors::OwoColorize;

use super::{color_enabled, is_quiet};

fn symbol(plain: &'static str, styled: impl std::fmt::Display) -> String {
    if color_enabled() {
        styled.to_string()
    } else {
        plain.to_string()
    }
}

/// Print a success message to stderr. Suppressed by `--quiet`.
pub fn success(message: &str) {
    if !is_quiet() {
        eprintln!("{} {}", symbol("✓", "✓".green().bold()), message);
    }
}

/// Print an info message to stderr. Suppressed by `--quiet`.
pub fn info(message: &str) {
    if !is_quiet() {
        eprintln!("{} {}", symbol("ℹ", "ℹ".blue().bold()), message);
    }
}

/// Print a warning message to stderr. Suppressed by `--quiet`.
pub fn warning(message: &str) {
    if is_quiet() {
        return;
    }
    if color_enabled() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        eprintln!("⚠ {message}");
    }
}
