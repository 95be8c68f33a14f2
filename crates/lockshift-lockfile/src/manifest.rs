//! Project `package.json` reading.
//!
//! Only the fields the exported lockfile needs are read; everything else in
//! the manifest is ignored.

use std::path::Path;

use lockshift_graph::ProjectMetadata;
use serde::Deserialize;

use crate::error::{LockfileError, Result};

pub const MANIFEST_NAME: &str = "package.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PackageManifest {
    pub name: Option<String>,
    pub version: Option<String>,
}

impl PackageManifest {
    /// Parse manifest text; `path` is only used for error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| LockfileError::InvalidManifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn into_metadata(self) -> ProjectMetadata {
        ProjectMetadata {
            name: self.name.filter(|name| !name.is_empty()),
            version: self.version.filter(|version| !version.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_other_fields() {
        let manifest = PackageManifest::parse(
            r#"{"name": "app", "version": "2.1.0", "scripts": {"build": "tsc"}}"#,
            Path::new("package.json"),
        )
        .unwrap();
        assert_eq!(manifest.name.as_deref(), Some("app"));
        assert_eq!(manifest.version.as_deref(), Some("2.1.0"));
    }

    #[test]
    fn test_empty_fields_become_missing() {
        let metadata = PackageManifest::parse(r#"{"name": ""}"#, Path::new("package.json"))
            .unwrap()
            .into_metadata();
        assert_eq!(metadata, ProjectMetadata::default());
    }

    #[test]
    fn test_invalid_json() {
        let err = PackageManifest::parse("{", Path::new("package.json")).unwrap_err();
        assert!(matches!(err, LockfileError::InvalidManifest { .. }));
    }
}
