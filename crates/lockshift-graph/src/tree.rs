//! Nested dependency tree shared by every compiler stage.

use std::collections::BTreeMap;

use crate::dep_path::DepPath;
use crate::snapshot::Snapshot;

/// Child packages keyed by the name they are required under.
pub type Dependencies = BTreeMap<String, TreeNode>;

/// Dependency name to the exact version a package expects.
pub type Requires = BTreeMap<String, String>;

/// One placed package instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Name the node is reachable under (alias name for aliased edges).
    pub name: String,
    pub dep_path: DepPath,
    /// Version as written to the lockfile; `npm:<name>@<version>` for aliases.
    pub version: String,
    pub resolved: Option<String>,
    pub integrity: Option<String>,
    pub dev: bool,
    pub optional: bool,
    pub requires: Requires,
    pub dependencies: Dependencies,
}

impl TreeNode {
    /// A childless node for `snapshot` reached through the edge `name`.
    pub fn from_snapshot(name: &str, dep_path: DepPath, snapshot: &Snapshot) -> Self {
        Self {
            name: name.to_string(),
            dep_path,
            version: snapshot.version_for(name),
            resolved: snapshot.resolution.locator(),
            integrity: snapshot.resolution.integrity().map(str::to_string),
            dev: snapshot.dev,
            optional: snapshot.optional,
            requires: Requires::new(),
            dependencies: Dependencies::new(),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self
            .dependencies
            .values()
            .map(TreeNode::node_count)
            .sum::<usize>()
    }

    /// Depth of this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .dependencies
            .values()
            .map(TreeNode::depth)
            .max()
            .unwrap_or(0)
    }
}

/// The root of a compiled tree: project metadata plus top-level packages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockTree {
    pub name: String,
    pub version: String,
    pub requires: Requires,
    pub dependencies: Dependencies,
}

impl LockTree {
    pub fn node_count(&self) -> usize {
        self.dependencies.values().map(TreeNode::node_count).sum()
    }

    pub fn depth(&self) -> usize {
        self.dependencies
            .values()
            .map(TreeNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// Follow a chain of names from the root, e.g. `["a", "b"]` for `a > b`.
    pub fn find(&self, path: &[&str]) -> Option<&TreeNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.dependencies.get(*first)?;
        for name in rest {
            node = node.dependencies.get(*name)?;
        }
        Some(node)
    }

    /// Visit every node depth-first with the names leading to it.
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(&[&'a str], &'a TreeNode)) {
        fn go<'a>(
            level: &'a Dependencies,
            trail: &mut Vec<&'a str>,
            visit: &mut impl FnMut(&[&'a str], &'a TreeNode),
        ) {
            for (name, node) in level {
                trail.push(name);
                visit(trail, node);
                go(&node.dependencies, trail, visit);
                trail.pop();
            }
        }
        go(&self.dependencies, &mut Vec::new(), &mut visit);
    }
}
