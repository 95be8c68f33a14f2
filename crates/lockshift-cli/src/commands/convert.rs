//! Convert command implementation.

use std::fs;
use std::io::Write as _;
use std::path::PathBuf;

use lockshift_config::{ConfigOverrides, ExportConfig, LockSchema};
use lockshift_graph::{LockTree, PackageLock, YarnLock};
use tracing::info;

use crate::cli::ConvertArgs;
use crate::commands::{pipeline, utils};
use crate::error::{Result, ResultExt};
use crate::ui;

/// Execute the convert command.
///
/// 1. Load config (defaults, lockshift.config.json, env, flags)
/// 2. Read pnpm-lock.yaml and package.json, convert the graph
/// 3. Render the configured schema
/// 4. Write it to the output file, or stdout with `--stdout`
pub fn execute(args: ConvertArgs) -> Result<()> {
    let overrides = ConfigOverrides {
        schema: args.schema.map(Into::into),
        registry: args.registry,
        output: args.output,
    };
    let output = pipeline::run(&args.dir, args.config.as_deref(), &overrides)?;
    let rendered = render(&output.conversion.tree, output.config.schema)?;

    if args.stdout {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    let path = output_path(&output.dir, &output.config);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_path(parent)?;
    }
    fs::write(&path, rendered).with_path(&path)?;

    info!(path = %path.display(), schema = %output.config.schema, "lockfile written");
    ui::success(&format!(
        "Wrote {} ({} packages)",
        path.display(),
        output.conversion.tree.node_count()
    ));
    Ok(())
}

/// Serialize `tree` in `schema`.
pub fn render(tree: &LockTree, schema: LockSchema) -> Result<String> {
    match schema {
        LockSchema::PackageLockV1 => PackageLock::from_tree(tree)
            .to_json()
            .context(format!("Rendering {}", schema.file_name())),
        LockSchema::YarnLockV1 => Ok(YarnLock::from_tree(tree).render()),
    }
}

fn output_path(dir: &std::path::Path, config: &ExportConfig) -> PathBuf {
    match &config.output {
        Some(path) => utils::resolve_path(path, dir),
        None => dir.join(config.schema.file_name()),
    }
}
