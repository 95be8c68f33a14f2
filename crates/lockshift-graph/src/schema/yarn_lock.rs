//! Classic `yarn.lock` (v1) rendering.
//!
//! Yarn v1 lockfiles are flat: one entry per `name@range` pattern. Ranges are
//! the exact versions from the tree, so each placed package contributes one
//! entry and every `dependencies` line points at another entry's key.

use std::collections::BTreeMap;

use crate::tree::{LockTree, TreeNode};

const HEADER: &str = "# THIS IS AN AUTOGENERATED FILE. DO NOT EDIT THIS FILE DIRECTLY.\n# yarn lockfile v1\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YarnEntry {
    pub version: String,
    pub resolved: Option<String>,
    pub integrity: Option<String>,
    pub dependencies: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YarnLock {
    pub entries: BTreeMap<String, YarnEntry>,
}

impl YarnLock {
    pub fn from_tree(tree: &LockTree) -> Self {
        let mut entries = BTreeMap::new();
        tree.walk(|_, node| {
            entries
                .entry(format!("{}@{}", node.name, node.version))
                .or_insert_with(|| YarnEntry::from(node));
        });
        Self { entries }
    }

    pub fn render(&self) -> String {
        let mut out = String::from(HEADER);
        for (key, entry) in &self.entries {
            out.push_str("\n\n");
            out.push_str(&entry.lines(key).join("\n"));
        }
        out.push('\n');
        out
    }
}

impl YarnEntry {
    fn lines(&self, key: &str) -> Vec<String> {
        let mut lines = vec![
            format!("{}:", maybe_quote(key)),
            format!("  version {}", maybe_quote(&self.version)),
        ];
        if let Some(resolved) = &self.resolved {
            lines.push(format!("  resolved {}", maybe_quote(resolved)));
        }
        if let Some(integrity) = &self.integrity {
            lines.push(format!("  integrity {}", maybe_quote(integrity)));
        }
        if !self.dependencies.is_empty() {
            lines.push("  dependencies:".to_string());
            lines.extend(
                self.dependencies
                    .iter()
                    .map(|(name, range)| format!("    {} {}", maybe_quote(name), maybe_quote(range))),
            );
        }
        lines
    }
}

impl From<&TreeNode> for YarnEntry {
    fn from(node: &TreeNode) -> Self {
        // aliases carry `npm:<name>@<version>`; yarn wants the bare version
        let version = node
            .version
            .strip_prefix("npm:")
            .and_then(|aliased| aliased.rsplit_once('@'))
            .map_or_else(|| node.version.clone(), |(_, version)| version.to_string());
        Self {
            version,
            resolved: node.resolved.clone(),
            integrity: node.integrity.clone(),
            dependencies: node.requires.clone(),
        }
    }
}

/// Quote the way yarn's own writer does.
fn maybe_quote(value: &str) -> String {
    let needs_quotes = value.starts_with("true")
        || value.starts_with("false")
        || !value.starts_with(|c: char| c.is_ascii_alphabetic())
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ':' | '\\' | '"' | ',' | '[' | ']'));
    if needs_quotes {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dep_path::DepPath;
    use crate::snapshot::{Resolution, Snapshot};

    fn node(name: &str, snapshot: &Snapshot) -> TreeNode {
        TreeNode::from_snapshot(
            name,
            DepPath::registry(&snapshot.name, &snapshot.version),
            snapshot,
        )
    }

    #[test]
    fn test_quoting() {
        assert_eq!(maybe_quote("lodash"), "lodash");
        assert_eq!(maybe_quote("4.17.21"), "\"4.17.21\"");
        assert_eq!(maybe_quote("@babel/core@7.0.0"), "\"@babel/core@7.0.0\"");
        assert_eq!(maybe_quote("https://x"), "\"https://x\"");
        assert_eq!(maybe_quote("sha512-ab+c/d=="), "sha512-ab+c/d==");
    }

    #[test]
    fn test_render_entries() {
        let lodash = Snapshot::builder("lodash", "4.17.21")
            .resolution(Resolution::Registry {
                tarball: Some("https://registry.npmjs.org/lodash/-/lodash-4.17.21.tgz".to_string()),
                integrity: Some("sha512-v2kDE".to_string()),
            })
            .build();
        let app = Snapshot::builder("@scope/app", "1.0.0").build();

        let mut scoped = node("@scope/app", &app);
        scoped
            .requires
            .insert("lodash".to_string(), "4.17.21".to_string());

        let mut tree = LockTree::default();
        tree.dependencies.insert("@scope/app".to_string(), scoped);
        tree.dependencies
            .insert("lodash".to_string(), node("lodash", &lodash));

        let rendered = YarnLock::from_tree(&tree).render();
        let expected = "# THIS IS AN AUTOGENERATED FILE. DO NOT EDIT THIS FILE DIRECTLY.
# yarn lockfile v1


\"@scope/app@1.0.0\":
  version \"1.0.0\"
  dependencies:
    lodash \"4.17.21\"

lodash@4.17.21:
  version \"4.17.21\"
  resolved \"https://registry.npmjs.org/lodash/-/lodash-4.17.21.tgz\"
  integrity sha512-v2kDE
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_empty_lock() {
        assert_eq!(YarnLock::default().render(), format!("{HEADER}\n"));
    }

    #[test]
    fn test_alias_entry_uses_real_version() {
        let snapshot = Snapshot::builder("string-width", "4.2.3").build();
        let mut tree = LockTree::default();
        tree.dependencies
            .insert("string-width-cjs".to_string(), node("string-width-cjs", &snapshot));

        let lock = YarnLock::from_tree(&tree);
        let entry = &lock.entries["string-width-cjs@npm:string-width@4.2.3"];
        assert_eq!(entry.version, "4.2.3");
    }
}
