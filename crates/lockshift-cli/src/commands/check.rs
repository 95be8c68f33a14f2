//! Check command implementation.
//!
//! Runs the full conversion, including verification, without writing.

use lockshift_config::ConfigOverrides;

use crate::cli::CheckArgs;
use crate::commands::pipeline;
use crate::error::Result;
use crate::ui::{self, TreeSummary};

pub fn execute(args: CheckArgs) -> Result<()> {
    ui::info(&format!("Checking {}", args.dir.display()));

    let output = pipeline::run(&args.dir, args.config.as_deref(), &ConfigOverrides::default())?;
    let summary = TreeSummary::from(&output.conversion);
    ui::print_tree_summary(&summary, output.elapsed);

    ui::success(&format!(
        "{} converts to {} cleanly",
        lockshift_lockfile::LOCKFILE_NAME,
        output.config.schema
    ));
    Ok(())
}
