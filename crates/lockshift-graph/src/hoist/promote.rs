//! Safety-checked promotion of a grandchild into its grandparent's level.

use tracing::trace;

use crate::dep_path::DepPath;
use crate::scope::{ResolutionScope, Versions};
use crate::tree::{Dependencies, Requires, TreeNode};

/// Move the copies of `name` at `dep_path` held by children of `level` up
/// into `level`, if no `requires` entry anywhere would stop resolving.
///
/// `owner_requires` belongs to the node (or root) that owns `level`; `above`
/// holds the versions visible from outside it. Nothing is mutated unless the
/// move is safe.
pub(crate) fn try_promote(
    level: &mut Dependencies,
    owner_requires: &Requires,
    above: &Versions,
    name: &str,
    dep_path: &DepPath,
) -> bool {
    if level.contains_key(name) {
        return false;
    }

    let holders: Vec<String> = level
        .iter()
        .filter(|(_, child)| {
            child
                .dependencies
                .get(name)
                .is_some_and(|copy| copy.dep_path == *dep_path)
        })
        .map(|(key, _)| key.clone())
        .collect();

    if !is_safe(level, owner_requires, above, name, &holders) {
        return false;
    }

    let mut promoted = None;
    for key in &holders {
        if let Some(child) = level.get_mut(key) {
            let removed = child.dependencies.remove(name);
            if promoted.is_none() {
                promoted = removed;
            }
        }
    }

    match promoted {
        Some(node) => {
            trace!(name, dep_path = %dep_path, from = holders.len(), "promoted");
            level.insert(name.to_string(), node);
            true
        }
        None => false,
    }
}

fn is_safe(
    level: &Dependencies,
    owner_requires: &Requires,
    above: &Versions,
    name: &str,
    holders: &[String],
) -> bool {
    let Some(candidate) = holders
        .first()
        .and_then(|key| level.get(key))
        .and_then(|holder| holder.dependencies.get(name))
    else {
        return false;
    };
    let version = candidate.version.as_str();

    if owner_requires.get(name).is_some_and(|wanted| wanted != version) {
        return false;
    }

    let conflicting_sibling = level
        .iter()
        .filter(|(key, _)| !holders.contains(*key))
        .any(|(_, child)| shadows_conflict(child, name, version));
    if conflicting_sibling {
        return false;
    }

    ResolutionScope::new()
        .with_outer(above)
        .with_level(level)
        .pin(name, version)
        .subtree_resolves(candidate)
}

/// Whether some node in `node`'s subtree requires `name` at a version other
/// than `version` without a nearer copy of `name` to fall back on.
fn shadows_conflict(node: &TreeNode, name: &str, version: &str) -> bool {
    if node.dependencies.contains_key(name) {
        return false;
    }
    if node.requires.get(name).is_some_and(|wanted| wanted != version) {
        return true;
    }
    node.dependencies
        .values()
        .any(|child| shadows_conflict(child, name, version))
}
