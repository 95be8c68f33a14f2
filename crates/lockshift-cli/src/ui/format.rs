//! Formatting for durations and the tree summary printed by `check`.

use std::time::Duration;

use console::Term;
use lockshift_graph::Conversion;
use owo_colors::OwoColorize;

use super::{color_enabled, is_quiet};

/// Shape of a converted tree, as reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSummary {
    pub name: String,
    pub version: String,
    pub packages: usize,
    pub top_level: usize,
    pub depth: usize,
    pub promoted: usize,
    pub deduplicated: usize,
    pub warnings: usize,
}

impl From<&Conversion> for TreeSummary {
    fn from(conversion: &Conversion) -> Self {
        let tree = &conversion.tree;
        Self {
            name: tree.name.clone(),
            version: tree.version.clone(),
            packages: tree.node_count(),
            top_level: tree.dependencies.len(),
            depth: tree.depth(),
            promoted: conversion.stats.promoted,
            deduplicated: conversion.stats.deduplicated,
            warnings: conversion.warnings.len(),
        }
    }
}

/// Format a duration as `50ms`, `1.50s` or `2m 30s`.
///
/// ```
/// use std::time::Duration;
/// use lockshift_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();
    if total_ms < 1000 {
        format!("{total_ms}ms")
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

fn summary_lines(summary: &TreeSummary) -> Vec<(&'static str, String)> {
    vec![
        ("Packages", summary.packages.to_string()),
        ("Top level", summary.top_level.to_string()),
        ("Max depth", summary.depth.to_string()),
        ("Hoisted", summary.promoted.to_string()),
        ("Deduplicated", summary.deduplicated.to_string()),
        ("Warnings", summary.warnings.to_string()),
    ]
}

/// Print the summary table to stderr.
pub fn print_tree_summary(summary: &TreeSummary, elapsed: Duration) {
    if is_quiet() {
        return;
    }
    let width = (Term::stderr().size().1 as usize).clamp(20, 60);
    let title = format!("{}@{}", summary.name, summary.version);
    let rule = "─".repeat(width);

    if color_enabled() {
        eprintln!("\n{}", title.bold().underline());
    } else {
        eprintln!("\n{title}");
    }
    eprintln!("{rule}");
    for (label, value) in summary_lines(summary) {
        if color_enabled() {
            eprintln!("  {} {:<14}{}", "▸".blue(), label, value.bright_white().bold());
        } else {
            eprintln!("  ▸ {label:<14}{value}");
        }
    }
    eprintln!("{rule}");
    eprintln!("  converted in {}", format_duration(elapsed));
}
