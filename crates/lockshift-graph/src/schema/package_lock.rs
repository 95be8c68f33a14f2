//! npm `package-lock.json` with `lockfileVersion: 1`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tree::{LockTree, TreeNode};

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageLock {
    pub name: String,
    pub version: String,
    pub lockfile_version: u8,
    pub requires: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, LockDependency>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockDependency {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub dev: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub requires: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, LockDependency>,
}

impl PackageLock {
    pub fn from_tree(tree: &LockTree) -> Self {
        Self {
            name: tree.name.clone(),
            version: tree.version.clone(),
            lockfile_version: 1,
            requires: true,
            dependencies: convert_level(&tree.dependencies),
        }
    }

    /// Two-space indented JSON with a trailing newline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

fn convert_level(level: &BTreeMap<String, TreeNode>) -> BTreeMap<String, LockDependency> {
    level
        .iter()
        .map(|(name, node)| (name.clone(), LockDependency::from(node)))
        .collect()
}

impl From<&TreeNode> for LockDependency {
    fn from(node: &TreeNode) -> Self {
        Self {
            version: node.version.clone(),
            resolved: node.resolved.clone(),
            integrity: node.integrity.clone(),
            dev: node.dev,
            optional: node.optional,
            requires: node.requires.clone(),
            dependencies: convert_level(&node.dependencies),
        }
    }
}
