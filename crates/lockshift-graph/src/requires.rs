//! Final `requires` maps and the resolution check over the finished tree.

use crate::error::{ConvertError, Result};
use crate::scope::{ResolutionScope, Versions, overlay};
use crate::snapshot::SnapshotGraph;
use crate::tree::{Dependencies, LockTree, Requires};
use crate::warning::Warning;

/// Rebuild every node's `requires` from its snapshot at its final position,
/// then verify the whole tree.
///
/// Regular dependencies are always listed. A peer is listed only when it
/// resolves to the version pnpm recorded from where the node ended up.
pub fn finalize(tree: &mut LockTree, graph: &SnapshotGraph) -> Result<Vec<Warning>> {
    let mut warnings = Vec::new();
    rebuild_level(
        &mut tree.dependencies,
        &Versions::default(),
        graph,
        &mut warnings,
    )?;
    verify(tree)?;
    Ok(warnings)
}

fn rebuild_level(
    level: &mut Dependencies,
    above: &Versions,
    graph: &SnapshotGraph,
    warnings: &mut Vec<Warning>,
) -> Result<()> {
    let visible = overlay(above, level);

    for node in level.values_mut() {
        let snapshot = graph
            .get(&node.dep_path)
            .ok_or_else(|| ConvertError::SnapshotNotFound {
                name: node.name.clone(),
                identifier: node.dep_path.to_string(),
            })?;

        let mut requires = Requires::new();
        for (dep_name, identifier) in &snapshot.dependencies {
            let (_, dep) = graph.lookup(dep_name, identifier)?;
            let version = dep.version_for(dep_name);
            if snapshot.is_peer(dep_name) {
                let resolved = node
                    .dependencies
                    .get(dep_name)
                    .map(|child| child.version.as_str())
                    .or_else(|| visible.get(dep_name).map(String::as_str));
                if resolved != Some(version.as_str()) {
                    let warning = Warning::UnsatisfiedPeer {
                        package: node.name.clone(),
                        peer: dep_name.clone(),
                    };
                    if !warnings.contains(&warning) {
                        warnings.push(warning);
                    }
                    continue;
                }
            }
            requires.insert(dep_name.clone(), version);
        }
        node.requires = requires;

        rebuild_level(&mut node.dependencies, &visible, graph, warnings)?;
    }
    Ok(())
}

/// Check that every `requires` entry in `tree`, the root's included, resolves
/// to the expected version by nearest-ancestor lookup.
pub fn verify(tree: &LockTree) -> Result<()> {
    let mut scope = ResolutionScope::new().with_level(&tree.dependencies);

    for (name, expected) in &tree.requires {
        let found = scope.resolve(name);
        if found != Some(expected.as_str()) {
            return Err(ConvertError::ResolutionViolation {
                path: "(root)".to_string(),
                dependency: name.clone(),
                expected: expected.clone(),
                found: found.map(str::to_string),
            });
        }
    }

    let mut trail = Vec::new();
    for node in tree.dependencies.values() {
        if let Some(violation) = scope.find_violation(node, &mut trail) {
            return Err(ConvertError::ResolutionViolation {
                path: violation.path.join(" > "),
                dependency: violation.dependency,
                expected: violation.expected,
                found: violation.found,
            });
        }
    }
    Ok(())
}
