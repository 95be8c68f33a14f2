//! `pnpm-lock.yaml` text to snapshot graph and root dependency set.

use std::path::Path;

use lockshift_graph::{
    ConvertError, DEFAULT_REGISTRY, DepPath, Resolution, RootDependencies, Snapshot,
    SnapshotGraph, registry_tarball,
};
use path_clean::PathClean;
use tracing::debug;

use crate::error::{LockfileError, Result};
use crate::raw::{RawLockfile, RawPackage, RawResolution};

pub const LOCKFILE_NAME: &str = "pnpm-lock.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Registry base URL used to derive missing tarball URLs. Ends with `/`.
    pub registry: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            registry: DEFAULT_REGISTRY.to_string(),
        }
    }
}

/// A parsed lockfile, ready for `lockshift_graph::convert`.
#[derive(Debug, Clone)]
pub struct LoadedLockfile {
    pub graph: SnapshotGraph,
    pub roots: RootDependencies,
}

pub fn parse_lockfile(text: &str, options: &LoadOptions) -> Result<LoadedLockfile> {
    let raw: RawLockfile =
        serde_saphyr::from_str(text).map_err(|e| LockfileError::InvalidYaml(e.to_string()))?;

    let mut graph = SnapshotGraph::new().with_lockfile_version(raw.lockfile_version.to_string());
    for (key, package) in &raw.packages {
        let path = DepPath::parse(key).map_err(|err| ConvertError::MalformedIdentifier {
            name: package.name.clone().unwrap_or_default(),
            identifier: key.clone(),
            reason: err.to_string(),
        })?;
        let snapshot = snapshot_from_raw(&path, package, &options.registry);
        graph.insert(path, snapshot);
    }

    let mut roots = RootDependencies::new();
    for (importer, sections) in raw.sections() {
        for section in sections {
            for (name, reference) in section {
                roots.insert(name.clone(), root_identifier(importer, reference.identifier()));
            }
        }
    }

    add_link_snapshots(&mut graph, &raw, &roots);

    debug!(
        lockfile_version = %raw.lockfile_version,
        packages = graph.len(),
        roots = roots.len(),
        "parsed pnpm lockfile"
    );
    Ok(LoadedLockfile { graph, roots })
}

fn snapshot_from_raw(path: &DepPath, package: &RawPackage, registry: &str) -> Snapshot {
    let name = package
        .name
        .clone()
        .or_else(|| path.name().map(str::to_string))
        .unwrap_or_else(|| fallback_name(path));
    let version = package
        .version
        .clone()
        .unwrap_or_else(|| path.version().to_string());

    let resolution = resolution_from_raw(&package.resolution, &name, &version, registry);

    let mut dependencies = package.dependencies.clone();
    dependencies.extend(
        package
            .optional_dependencies
            .iter()
            .map(|(name, id)| (name.clone(), id.clone())),
    );

    Snapshot {
        name,
        version,
        resolution,
        dependencies,
        peer_dependencies: package.peer_dependencies.clone(),
        dev: package.dev == Some(true),
        optional: package.optional,
    }
}

fn resolution_from_raw(raw: &RawResolution, name: &str, version: &str, registry: &str) -> Resolution {
    if let (Some(repo), Some(commit)) = (&raw.repo, &raw.commit) {
        return Resolution::Git {
            repo: repo.clone(),
            commit: commit.clone(),
        };
    }
    if let Some(directory) = &raw.directory {
        return Resolution::Link {
            path: format!("file:{directory}"),
        };
    }
    if let Some(tarball) = raw.tarball.as_ref().filter(|t| t.starts_with("file:")) {
        return Resolution::Link {
            path: tarball.clone(),
        };
    }
    let tarball = raw.tarball.clone().or_else(|| {
        (raw.kind.is_none() && raw.integrity.is_some())
            .then(|| registry_tarball(registry, name, version))
    });
    Resolution::Registry {
        tarball,
        integrity: raw.integrity.clone(),
    }
}

/// Name for packages whose key carries none, e.g. `github.com/user/repo/sha`.
fn fallback_name(path: &DepPath) -> String {
    let raw = match path.base() {
        DepPath::Git { url, .. } => url.as_str(),
        DepPath::Link { path } => path.as_str(),
        DepPath::Registry { name, .. } => name.as_str(),
        DepPath::PeerQualified { .. } => "",
    };
    let last = raw.trim_end_matches('/').rsplit(|c: char| c == '/' || c == ':').next().unwrap_or(raw);
    last.strip_suffix(".git").unwrap_or(last).to_string()
}

/// Importer links are relative to the importer's directory; the merged root
/// set lives at the lockfile's directory.
fn root_identifier(importer: &str, identifier: &str) -> String {
    match identifier.strip_prefix("link:") {
        Some(target) => format!("link:{}", rebase_link(importer, target)),
        None => identifier.to_string(),
    }
}

fn rebase_link(importer: &str, target: &str) -> String {
    Path::new(importer)
        .join(target)
        .clean()
        .to_string_lossy()
        .replace('\\', "/")
}

/// pnpm keeps no `packages` entry for `link:` dependencies; synthesize one
/// so every edge resolves.
fn add_link_snapshots(graph: &mut SnapshotGraph, raw: &RawLockfile, roots: &RootDependencies) {
    let package_edges = raw
        .packages
        .values()
        .flat_map(|package| package.dependencies.iter().chain(&package.optional_dependencies));

    let links: Vec<(String, String)> = roots
        .iter()
        .chain(package_edges)
        .filter(|(_, identifier)| identifier.starts_with("link:"))
        .map(|(name, identifier)| (name.clone(), identifier.clone()))
        .collect();

    for (name, identifier) in links {
        let path = DepPath::Link {
            path: identifier.clone(),
        };
        if graph.contains(&path) {
            continue;
        }
        let target = identifier.trim_start_matches("link:");
        let snapshot = Snapshot::builder(name, format!("file:{target}"))
            .resolution(Resolution::Link { path: identifier })
            .build();
        graph.insert(path, snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_name() {
        let git = DepPath::parse("github.com/user/my-lib/abc123").unwrap();
        assert_eq!(fallback_name(&git), "my-lib");
        let hashed = DepPath::parse("git+https://github.com/user/other.git#v1").unwrap();
        assert_eq!(fallback_name(&hashed), "other");
    }

    #[test]
    fn test_resolution_kinds() {
        let registry = RawResolution {
            integrity: Some("sha512-x".to_string()),
            ..RawResolution::default()
        };
        assert_eq!(
            resolution_from_raw(&registry, "@scope/pkg", "1.0.0", DEFAULT_REGISTRY),
            Resolution::Registry {
                tarball: Some("https://registry.npmjs.org/@scope/pkg/-/pkg-1.0.0.tgz".to_string()),
                integrity: Some("sha512-x".to_string()),
            }
        );

        let git = RawResolution {
            repo: Some("https://github.com/user/repo.git".to_string()),
            commit: Some("abc".to_string()),
            kind: Some("git".to_string()),
            ..RawResolution::default()
        };
        assert!(matches!(
            resolution_from_raw(&git, "repo", "1.0.0", DEFAULT_REGISTRY),
            Resolution::Git { .. }
        ));

        let directory = RawResolution {
            directory: Some("../local".to_string()),
            kind: Some("directory".to_string()),
            ..RawResolution::default()
        };
        assert_eq!(
            resolution_from_raw(&directory, "local", "1.0.0", DEFAULT_REGISTRY),
            Resolution::Link {
                path: "file:../local".to_string()
            }
        );
    }

    #[test]
    fn test_importer_links_rebase_onto_lockfile_dir() {
        assert_eq!(root_identifier("packages/web", "link:../shared"), "link:packages/shared");
        assert_eq!(root_identifier(".", "link:packages/web"), "link:packages/web");
        assert_eq!(root_identifier(".", "link:../sibling"), "link:../sibling");
        assert_eq!(root_identifier("packages/web", "1.0.0"), "1.0.0");
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse_lockfile("lockfileVersion: [", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LockfileError::InvalidYaml(_)));
    }
}
