//! Graph to nested tree.
//!
//! Each package is placed under its dependent unless an ancestor level
//! already holds the very same dependency path under that name. Peer
//! dependencies are never embedded; they resolve from the consumer's side.
//!
//! Below the root level, every node's children are compacted with the
//! hoisting passes as soon as they are built, and the finished subtree is
//! cached. A subtree only depends on what the enclosing levels hold under the
//! names its snapshots depend on, so a later edge to the same package with
//! the same outer view reuses it. Shared dependencies therefore cost one
//! expansion instead of one per path from the root.

use std::collections::BTreeSet;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::dep_path::DepPath;
use crate::error::{ConvertError, Result};
use crate::hoist::{HoistStats, compact_level};
use crate::scope::Versions;
use crate::snapshot::{RootDependencies, Snapshot, SnapshotGraph};
use crate::tree::{Dependencies, LockTree, Requires, TreeNode};
use crate::warning::Warning;

/// Output of [`expand`]: a tree with empty project metadata.
#[derive(Debug, Clone)]
pub struct Expansion {
    pub tree: LockTree,
    pub warnings: Vec<Warning>,
    /// Moves made while compacting subtrees.
    pub stats: HoistStats,
}

/// A package visible from some position, by the name it is visible under.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Placed {
    dep_path: DepPath,
    version: String,
}

type Visible = FxHashMap<String, Placed>;

struct Edge<'g> {
    name: String,
    dep_path: DepPath,
    snapshot: &'g Snapshot,
}

/// A compacted subtree and the outer view it was built under.
struct Compacted {
    /// Every name the subtree's snapshots depend on, with what the
    /// enclosing levels held under it.
    outer: Vec<(String, Option<Placed>)>,
    node: TreeNode,
}

impl Compacted {
    fn fits(&self, visible: &Visible) -> bool {
        self.outer
            .iter()
            .all(|(name, placed)| visible.get(name) == placed.as_ref())
    }
}

struct Expander<'g> {
    graph: &'g SnapshotGraph,
    /// Dependency paths from the root to the node being expanded, each with
    /// the visibility of the level it was placed in.
    chain: Vec<(DepPath, Rc<Visible>)>,
    /// Finished subtrees by edge name and dependency path.
    cache: FxHashMap<(String, DepPath), Vec<Compacted>>,
    warnings: Vec<Warning>,
    stats: HoistStats,
    reused: usize,
}

/// Expand the root dependency set into a nested tree.
///
/// Fails with [`ConvertError::UnrepresentableCycle`] when a dependency path
/// would be re-entered with exactly the same visibility as an ancestor copy,
/// which no finite tree can express.
pub fn expand(graph: &SnapshotGraph, roots: &RootDependencies) -> Result<Expansion> {
    let mut expander = Expander {
        graph,
        chain: Vec::new(),
        cache: FxHashMap::default(),
        warnings: Vec::new(),
        stats: HoistStats::default(),
        reused: 0,
    };

    let edges = roots
        .iter()
        .map(|(name, identifier)| expander.resolve_edge(name, identifier))
        .collect::<Result<Vec<_>>>()?;

    let requires: Requires = edges
        .iter()
        .map(|edge| (edge.name.clone(), edge.snapshot.version_for(&edge.name)))
        .collect();

    let dependencies = expander.expand_level(edges, &Visible::default())?;
    let tree = LockTree {
        name: String::new(),
        version: String::new(),
        requires,
        dependencies,
    };
    debug!(
        nodes = tree.node_count(),
        depth = tree.depth(),
        subtrees = expander.cache.values().map(Vec::len).sum::<usize>(),
        reused = expander.reused,
        "expanded snapshot graph"
    );

    Ok(Expansion {
        tree,
        warnings: expander.warnings,
        stats: expander.stats,
    })
}

impl<'g> Expander<'g> {
    fn resolve_edge(&self, name: &str, identifier: &str) -> Result<Edge<'g>> {
        let (dep_path, snapshot) = self.graph.lookup(name, identifier)?;
        Ok(Edge {
            name: name.to_string(),
            dep_path,
            snapshot,
        })
    }

    fn warn(&mut self, warning: Warning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    fn expand_level(&mut self, edges: Vec<Edge<'g>>, parent: &Visible) -> Result<Dependencies> {
        let mut visible = parent.clone();
        for edge in &edges {
            visible.insert(
                edge.name.clone(),
                Placed {
                    dep_path: edge.dep_path.clone(),
                    version: edge.snapshot.version_for(&edge.name),
                },
            );
        }
        let visible = Rc::new(visible);

        let mut level = Dependencies::new();
        for edge in edges {
            let repeats = self
                .chain
                .iter()
                .any(|(path, seen)| *path == edge.dep_path && **seen == *visible);
            if repeats {
                let chain = self
                    .chain
                    .iter()
                    .map(|(path, _)| path.to_string())
                    .chain(std::iter::once(edge.dep_path.to_string()))
                    .collect();
                return Err(ConvertError::UnrepresentableCycle { chain });
            }

            let node = self.expand_node(edge, &visible)?;
            level.insert(node.name.clone(), node);
        }
        Ok(level)
    }

    fn expand_node(&mut self, edge: Edge<'g>, visible: &Rc<Visible>) -> Result<TreeNode> {
        let key = (edge.name.clone(), edge.dep_path.clone());
        let cached = self
            .cache
            .get(&key)
            .and_then(|entries| entries.iter().find(|entry| entry.fits(visible)))
            .map(|entry| entry.node.clone());
        if let Some(node) = cached {
            self.reused += 1;
            return Ok(node);
        }

        let mut node = TreeNode::from_snapshot(&edge.name, edge.dep_path.clone(), edge.snapshot);
        let mut embedded = Vec::new();

        for (dep_name, identifier) in &edge.snapshot.dependencies {
            let dep = self.resolve_edge(dep_name, identifier)?;
            let version = dep.snapshot.version_for(dep_name);
            let placed = visible.get(dep_name.as_str());

            if edge.snapshot.is_peer(dep_name) {
                if placed.is_some_and(|p| p.version == version) {
                    node.requires.insert(dep_name.clone(), version);
                } else {
                    self.warn(Warning::UnsatisfiedPeer {
                        package: edge.name.clone(),
                        peer: dep_name.clone(),
                    });
                }
                continue;
            }

            node.requires.insert(dep_name.clone(), version);
            if placed.is_some_and(|p| p.dep_path == dep.dep_path) {
                continue;
            }
            embedded.push(dep);
        }

        if !embedded.is_empty() {
            self.chain.push((edge.dep_path, Rc::clone(visible)));
            let children = self.expand_level(embedded, visible);
            self.chain.pop();
            node.dependencies = children?;

            let above: Versions = visible
                .iter()
                .map(|(name, placed)| (name.clone(), placed.version.clone()))
                .collect();
            compact_level(&mut node.dependencies, &node.requires, &above, &mut self.stats);
        }

        let mut names = BTreeSet::new();
        dependency_names(self.graph, &node, &mut names);
        let outer = names
            .into_iter()
            .map(|name| (name.to_string(), visible.get(name).cloned()))
            .collect();
        self.cache.entry(key).or_default().push(Compacted {
            outer,
            node: node.clone(),
        });
        Ok(node)
    }
}

/// Names of every edge of every snapshot placed in `node`'s subtree.
///
/// Compaction only drops copies whose dependency path stays on the level
/// above, so this covers every name the subtree's expansion looked up.
fn dependency_names<'g>(graph: &'g SnapshotGraph, node: &TreeNode, names: &mut BTreeSet<&'g str>) {
    if let Some(snapshot) = graph.get(&node.dep_path) {
        names.extend(snapshot.dependencies.keys().map(String::as_str));
    }
    for child in node.dependencies.values() {
        dependency_names(graph, child, names);
    }
}
