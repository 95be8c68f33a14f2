//! Load everything a conversion needs and run it.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use lockshift_config::{ConfigOverrides, ExportConfig};
use lockshift_graph::{Conversion, ProjectMetadata, convert};
use lockshift_lockfile::{LoadOptions, LockfileError, load_lockfile, read_manifest};
use tracing::debug;

use crate::commands::utils;
use crate::error::{Result, ResultExt};
use crate::ui;

/// A finished conversion plus the settings it ran with.
#[derive(Debug)]
pub struct PipelineOutput {
    pub dir: PathBuf,
    pub config: ExportConfig,
    pub conversion: Conversion,
    pub elapsed: Duration,
}

/// Resolve config for `dir`, read its lockfile and manifest, and convert.
///
/// Conversion warnings are printed as they are returned; a missing or
/// unreadable `package.json` falls back to placeholder metadata.
pub fn run(dir: &Path, config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<PipelineOutput> {
    let dir = utils::project_dir(dir)?;
    let config_path = config_path.map(|path| utils::resolve_path(path, &dir));
    let config = ExportConfig::load(&dir, config_path.as_deref(), overrides)
        .context(format!("Loading configuration for {}", dir.display()))?;

    let started = Instant::now();
    let options = LoadOptions {
        registry: config.registry.clone(),
    };
    let lockfile = load_lockfile(&dir, &options)?;
    let metadata = project_metadata(&dir);
    let conversion = convert(&lockfile.graph, &lockfile.roots, metadata)?;
    let elapsed = started.elapsed();

    for warning in &conversion.warnings {
        ui::warning(&warning.to_string());
    }

    Ok(PipelineOutput {
        dir,
        config,
        conversion,
        elapsed,
    })
}

fn project_metadata(dir: &Path) -> ProjectMetadata {
    match read_manifest(dir) {
        Ok(manifest) => manifest.into_metadata(),
        Err(LockfileError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "no package.json");
            ProjectMetadata::default()
        }
        Err(err) => {
            ui::warning(&format!("Ignoring package.json: {err}"));
            ProjectMetadata::default()
        }
    }
}
