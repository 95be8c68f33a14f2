//! Hoisting: shrink a valid nested tree while keeping it valid.
//!
//! Every level is processed bottom-up in two passes, repeated until neither
//! changes anything:
//!
//! - **Pass A** drops grandchild copies that are identical to a package the
//!   level already holds, and promotes names that every holding child agrees
//!   on.
//! - **Pass B** promotes the remaining agreed-on names in dependency order,
//!   so a package's own dependencies reach the level before it does.
//!
//! Each promotion is checked up front against the whole subtree it affects
//! (see `promote`), so a rejected move leaves the tree untouched. Sweeps over
//! the full tree repeat until a sweep makes no change, which makes
//! [`flatten`] idempotent.

mod candidates;
mod promote;

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::dep_path::DepPath;
use crate::scope::{Versions, overlay};
use crate::tree::{Dependencies, LockTree, Requires, TreeNode};

use self::candidates::CandidateIndex;
use self::promote::try_promote;

/// Counters describing what a [`flatten`] run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoistStats {
    /// Full-tree sweeps, including the final one that changed nothing.
    pub sweeps: usize,
    pub promoted: usize,
    pub deduplicated: usize,
}

impl HoistStats {
    /// Add the moves counted in `other`; sweeps stay as they are.
    pub fn absorb(&mut self, other: HoistStats) {
        self.promoted += other.promoted;
        self.deduplicated += other.deduplicated;
    }
}

/// Hoist `tree` to a fixpoint.
pub fn flatten(tree: &mut LockTree) -> HoistStats {
    let mut stats = HoistStats::default();
    let before = tree.node_count();
    loop {
        stats.sweeps += 1;
        let changed = flatten_level(
            &mut tree.dependencies,
            &tree.requires,
            &Versions::default(),
            &mut stats,
        );
        if !changed {
            break;
        }
    }
    debug!(
        sweeps = stats.sweeps,
        promoted = stats.promoted,
        deduplicated = stats.deduplicated,
        nodes_before = before,
        nodes_after = tree.node_count(),
        "hoisting reached fixpoint"
    );
    stats
}

fn flatten_level(
    level: &mut Dependencies,
    owner_requires: &Requires,
    above: &Versions,
    stats: &mut HoistStats,
) -> bool {
    let mut changed = false;

    let visible = overlay(above, level);
    for node in level.values_mut() {
        let TreeNode {
            dependencies,
            requires,
            ..
        } = node;
        changed |= flatten_level(dependencies, requires, &visible, stats);
    }

    changed |= compact_level(level, owner_requires, above, stats);
    changed
}

/// Run both passes on `level` alone, leaving deeper levels as they are,
/// until neither changes anything.
pub(crate) fn compact_level(
    level: &mut Dependencies,
    owner_requires: &Requires,
    above: &Versions,
    stats: &mut HoistStats,
) -> bool {
    let mut changed = false;
    loop {
        let deduped = dedup_pass(level, owner_requires, above, stats);
        let ordered = ordered_pass(level, owner_requires, above, stats);
        if !(deduped || ordered) {
            break;
        }
        changed = true;
    }
    changed
}

/// Pass A.
fn dedup_pass(
    level: &mut Dependencies,
    owner_requires: &Requires,
    above: &Versions,
    stats: &mut HoistStats,
) -> bool {
    let index = CandidateIndex::build(level);
    let mut changed = false;

    for (name, holders) in index.iter() {
        let Some(existing) = level.get(name).map(|node| node.dep_path.clone()) else {
            continue;
        };
        for (key, path) in holders {
            if *path != existing {
                continue;
            }
            let removed = level
                .get_mut(key)
                .and_then(|child| child.dependencies.remove(name));
            if removed.is_some() {
                stats.deduplicated += 1;
                changed = true;
            }
        }
    }

    for (name, path) in index.unambiguous() {
        if try_promote(level, owner_requires, above, name, path) {
            stats.promoted += 1;
            changed = true;
        }
    }
    changed
}

/// Pass B.
fn ordered_pass(
    level: &mut Dependencies,
    owner_requires: &Requires,
    above: &Versions,
    stats: &mut HoistStats,
) -> bool {
    let mut pending = pending_promotions(level);
    let mut changed = false;

    while let Some(name) = next_ready(&pending) {
        let Some((path, _)) = pending.remove(&name) else {
            break;
        };
        if try_promote(level, owner_requires, above, &name, &path) {
            stats.promoted += 1;
            changed = true;
        }
    }
    changed
}

/// Agreed-on names absent from `level`, each with the names its candidate
/// copy requires.
fn pending_promotions(level: &Dependencies) -> BTreeMap<String, (DepPath, BTreeSet<String>)> {
    let index = CandidateIndex::build(level);
    index
        .unambiguous()
        .filter(|(name, _)| !level.contains_key(*name))
        .map(|(name, path)| {
            let needs = level
                .values()
                .find_map(|child| child.dependencies.get(name))
                .map(|copy| copy.requires.keys().cloned().collect())
                .unwrap_or_default();
            (name.to_string(), (path.clone(), needs))
        })
        .collect()
}

/// First name whose requirements are no longer pending; on a cycle, the
/// first name overall.
fn next_ready(pending: &BTreeMap<String, (DepPath, BTreeSet<String>)>) -> Option<String> {
    pending
        .iter()
        .find(|(_, (_, needs))| !needs.iter().any(|need| pending.contains_key(need)))
        .or_else(|| pending.iter().next())
        .map(|(name, _)| name.clone())
}
