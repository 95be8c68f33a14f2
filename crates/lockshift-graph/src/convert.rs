//! End-to-end conversion: expand, hoist, finalize.

use tracing::{debug, info};

use crate::error::Result;
use crate::expand::expand;
use crate::hoist::{HoistStats, flatten};
use crate::requires::finalize;
use crate::snapshot::{RootDependencies, SUPPORTED_LOCKFILE_VERSION, SnapshotGraph};
use crate::tree::LockTree;
use crate::warning::Warning;

/// Written when the project manifest has no name.
pub const PLACEHOLDER_NAME: &str = "package";
/// Written when the project manifest has no version.
pub const PLACEHOLDER_VERSION: &str = "0.0.0";

/// Name and version of the project owning the lockfile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectMetadata {
    pub name: Option<String>,
    pub version: Option<String>,
}

impl ProjectMetadata {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            version: Some(version.into()),
        }
    }
}

/// A finished tree with everything noticed along the way.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub tree: LockTree,
    pub warnings: Vec<Warning>,
    pub stats: HoistStats,
}

/// Compile `graph` reached from `roots` into a verified, hoisted tree.
pub fn convert(
    graph: &SnapshotGraph,
    roots: &RootDependencies,
    metadata: ProjectMetadata,
) -> Result<Conversion> {
    let mut warnings = Vec::new();

    if let Some(found) = graph.lockfile_version().filter(|v| is_newer_than_supported(v)) {
        warnings.push(Warning::UnsupportedLockVersion {
            found: found.to_string(),
            supported: SUPPORTED_LOCKFILE_VERSION.to_string(),
        });
    }

    let name = metadata.name.unwrap_or_else(|| {
        warnings.push(Warning::MissingProjectMetadata {
            field: "name",
            placeholder: PLACEHOLDER_NAME,
        });
        PLACEHOLDER_NAME.to_string()
    });
    let version = metadata.version.unwrap_or_else(|| {
        warnings.push(Warning::MissingProjectMetadata {
            field: "version",
            placeholder: PLACEHOLDER_VERSION,
        });
        PLACEHOLDER_VERSION.to_string()
    });

    let expansion = expand(graph, roots)?;
    let mut tree = expansion.tree;
    tree.name = name;
    tree.version = version;

    let mut stats = flatten(&mut tree);
    stats.absorb(expansion.stats);
    // peers are judged at their final position, so the expansion's own
    // peer warnings are superseded here
    warnings.extend(finalize(&mut tree, graph)?);

    // callers surface warnings themselves
    for warning in &warnings {
        debug!(%warning, "conversion warning");
    }
    info!(
        packages = tree.node_count(),
        depth = tree.depth(),
        promoted = stats.promoted,
        deduplicated = stats.deduplicated,
        "converted lockfile"
    );

    Ok(Conversion {
        tree,
        warnings,
        stats,
    })
}

fn is_newer_than_supported(found: &str) -> bool {
    match (
        found.trim().parse::<f64>(),
        SUPPORTED_LOCKFILE_VERSION.parse::<f64>(),
    ) {
        (Ok(found), Ok(supported)) => found > supported,
        _ => false,
    }
}
