//! Serde model of `pnpm-lock.yaml`, lockfile versions 5.x and 6.x.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

pub(crate) type RawDependencyMap = IndexMap<String, RawReference>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawLockfile {
    pub lockfile_version: RawVersion,
    #[serde(default)]
    pub importers: IndexMap<String, RawImporter>,
    #[serde(default)]
    pub dependencies: RawDependencyMap,
    #[serde(default)]
    pub dev_dependencies: RawDependencyMap,
    #[serde(default)]
    pub optional_dependencies: RawDependencyMap,
    #[serde(default)]
    pub packages: IndexMap<String, RawPackage>,
}

impl RawLockfile {
    /// Dependency sections of every importer keyed by the importer's
    /// directory, in declaration order. A single-project lockfile has its
    /// sections at the top level, under `.`.
    pub fn sections(&self) -> Vec<(&str, [&RawDependencyMap; 3])> {
        if self.importers.is_empty() {
            vec![(
                ".",
                [
                    &self.dependencies,
                    &self.dev_dependencies,
                    &self.optional_dependencies,
                ],
            )]
        } else {
            self.importers
                .iter()
                .map(|(dir, importer)| {
                    (
                        dir.as_str(),
                        [
                            &importer.dependencies,
                            &importer.dev_dependencies,
                            &importer.optional_dependencies,
                        ],
                    )
                })
                .collect()
        }
    }
}

/// `lockfileVersion` is a bare number in v5 (`5.4`) and a string in v6 (`'6.0'`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawVersion {
    Number(f64),
    Text(String),
}

impl fmt::Display for RawVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) if n.fract() == 0.0 => write!(f, "{n:.1}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawImporter {
    #[serde(default)]
    pub dependencies: RawDependencyMap,
    #[serde(default)]
    pub dev_dependencies: RawDependencyMap,
    #[serde(default)]
    pub optional_dependencies: RawDependencyMap,
}

/// v5 writes `name: identifier`; v6 writes `name: {specifier, version}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawReference {
    Plain(String),
    Detailed { version: String },
}

impl RawReference {
    pub fn identifier(&self) -> &str {
        match self {
            Self::Plain(id) | Self::Detailed { version: id } => id,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawPackage {
    #[serde(default)]
    pub resolution: RawResolution,
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub optional_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub peer_dependencies: BTreeMap<String, String>,
    pub dev: Option<bool>,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawResolution {
    pub integrity: Option<String>,
    pub tarball: Option<String>,
    pub repo: Option<String>,
    pub commit: Option<String>,
    pub directory: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
