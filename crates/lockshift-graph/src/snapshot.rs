//! The read-only snapshot graph handed to the compiler.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::dep_path::{DepPath, normalize};
use crate::error::{ConvertError, Result};

/// Registry used to derive tarball URLs when the lockfile omits them.
pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org/";

/// Newest pnpm lockfile schema the converter has been checked against.
pub const SUPPORTED_LOCKFILE_VERSION: &str = "6.0";

/// Root dependency set: package name to identifier, in lockfile order.
pub type RootDependencies = IndexMap<String, String>;

/// Where a package's contents come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Resolution {
    Registry {
        tarball: Option<String>,
        integrity: Option<String>,
    },
    Git {
        repo: String,
        commit: String,
    },
    Link {
        path: String,
    },
}

impl Resolution {
    /// The `resolved` locator written to npm lockfiles.
    pub fn locator(&self) -> Option<String> {
        match self {
            Self::Registry { tarball, .. } => tarball.clone(),
            Self::Git { repo, commit } => {
                let repo = if repo.starts_with("git+") || repo.starts_with("git@") {
                    repo.clone()
                } else {
                    format!("git+{repo}")
                };
                Some(format!("{repo}#{commit}"))
            }
            Self::Link { .. } => None,
        }
    }

    pub fn integrity(&self) -> Option<&str> {
        match self {
            Self::Registry { integrity, .. } => integrity.as_deref(),
            _ => None,
        }
    }
}

/// Build the conventional tarball URL for a registry package.
///
/// `registry` is expected to end with `/`.
pub fn registry_tarball(registry: &str, name: &str, version: &str) -> String {
    let unscoped = name.rsplit('/').next().unwrap_or(name);
    format!("{registry}{name}/-/{unscoped}-{version}.tgz")
}

/// One concrete package instance in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Real package name (may differ from the edge name for aliases).
    pub name: String,
    pub version: String,
    pub resolution: Resolution,
    /// Outgoing edges: dependency name to identifier. Includes peers.
    pub dependencies: BTreeMap<String, String>,
    /// Declared peer dependency names and their ranges.
    pub peer_dependencies: BTreeMap<String, String>,
    pub dev: bool,
    pub optional: bool,
}

impl Snapshot {
    pub fn builder(name: impl Into<String>, version: impl Into<String>) -> SnapshotBuilder {
        SnapshotBuilder::new(name, version)
    }

    pub fn is_peer(&self, dependency: &str) -> bool {
        self.peer_dependencies.contains_key(dependency)
    }

    /// Version string as it appears in a tree reached through `edge_name`.
    ///
    /// Aliased registry packages are written as `npm:<real-name>@<version>`.
    pub fn version_for(&self, edge_name: &str) -> String {
        if edge_name != self.name && matches!(self.resolution, Resolution::Registry { .. }) {
            format!("npm:{}@{}", self.name, self.version)
        } else {
            self.version.clone()
        }
    }
}

/// Builder for [`Snapshot`]. Registry resolution without a tarball by default.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    snapshot: Snapshot,
}

impl SnapshotBuilder {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            snapshot: Snapshot {
                name: name.into(),
                version: version.into(),
                resolution: Resolution::Registry {
                    tarball: None,
                    integrity: None,
                },
                dependencies: BTreeMap::new(),
                peer_dependencies: BTreeMap::new(),
                dev: false,
                optional: false,
            },
        }
    }

    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.snapshot.resolution = resolution;
        self
    }

    pub fn dependency(mut self, name: impl Into<String>, identifier: impl Into<String>) -> Self {
        self.snapshot
            .dependencies
            .insert(name.into(), identifier.into());
        self
    }

    /// Declare a peer and record the identifier pnpm resolved it to.
    pub fn peer(
        mut self,
        name: impl Into<String>,
        range: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        let name = name.into();
        self.snapshot
            .peer_dependencies
            .insert(name.clone(), range.into());
        self.snapshot.dependencies.insert(name, identifier.into());
        self
    }

    pub fn dev(mut self, dev: bool) -> Self {
        self.snapshot.dev = dev;
        self
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.snapshot.optional = optional;
        self
    }

    pub fn build(self) -> Snapshot {
        self.snapshot
    }
}

/// Dependency path to snapshot map, plus the lockfile's declared version.
#[derive(Debug, Clone, Default)]
pub struct SnapshotGraph {
    lockfile_version: Option<String>,
    snapshots: FxHashMap<DepPath, Snapshot>,
}

impl SnapshotGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lockfile_version(mut self, version: impl Into<String>) -> Self {
        self.lockfile_version = Some(version.into());
        self
    }

    pub fn set_lockfile_version(&mut self, version: impl Into<String>) {
        self.lockfile_version = Some(version.into());
    }

    pub fn lockfile_version(&self) -> Option<&str> {
        self.lockfile_version.as_deref()
    }

    pub fn insert(&mut self, path: DepPath, snapshot: Snapshot) -> Option<Snapshot> {
        self.snapshots.insert(path, snapshot)
    }

    /// Insert under a raw lockfile key such as `/lodash/4.17.21`.
    pub fn insert_key(&mut self, key: &str, snapshot: Snapshot) -> Result<Option<Snapshot>> {
        let path = DepPath::parse(key).map_err(|err| ConvertError::MalformedIdentifier {
            name: snapshot.name.clone(),
            identifier: key.to_string(),
            reason: err.to_string(),
        })?;
        Ok(self.insert(path, snapshot))
    }

    pub fn get(&self, path: &DepPath) -> Option<&Snapshot> {
        self.snapshots.get(path)
    }

    pub fn contains(&self, path: &DepPath) -> bool {
        self.snapshots.contains_key(path)
    }

    /// Resolve the edge `(name, identifier)` to its dependency path and snapshot.
    ///
    /// Tries the normalized path first, then `/name/identifier` when the
    /// identifier happened to parse as a path of its own.
    pub fn lookup(&self, name: &str, identifier: &str) -> Result<(DepPath, &Snapshot)> {
        let path = normalize(name, identifier)?;
        if let Some(snapshot) = self.snapshots.get(&path) {
            return Ok((path, snapshot));
        }
        DepPath::parse(&format!("/{name}/{identifier}"))
            .ok()
            .and_then(|qualified| {
                let snapshot = self.snapshots.get(&qualified)?;
                Some((qualified, snapshot))
            })
            .ok_or_else(|| ConvertError::SnapshotNotFound {
                name: name.to_string(),
                identifier: identifier.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DepPath, &Snapshot)> {
        self.snapshots.iter()
    }
}
