//! Nearest-ancestor name resolution over a partially built tree.
//!
//! Node's module resolution looks for a dependency in the requiring package's
//! own `node_modules`, then in each enclosing one up to the root. A
//! [`ResolutionScope`] models that lookup as a stack of levels, innermost
//! last, backed by a flat map of versions visible from above the stack.
//!
//! A scope can also carry one *pinned* entry: a package that does not exist in
//! the tree yet but would sit at the base level. The hoister uses this to ask
//! "would everything still resolve if I moved this package here?" without
//! mutating anything.

use rustc_hash::FxHashMap;

use crate::tree::{Dependencies, TreeNode};

/// Flattened view of the versions visible from some position.
pub type Versions = FxHashMap<String, String>;

/// A `requires` entry that does not resolve to the expected version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Names from the scope's base to the offending node.
    pub path: Vec<String>,
    pub dependency: String,
    pub expected: String,
    pub found: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ResolutionScope<'a> {
    levels: Vec<&'a Dependencies>,
    pinned: Option<(&'a str, &'a str)>,
    outer: Option<&'a Versions>,
}

impl<'a> ResolutionScope<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fall back to `outer` once every level misses.
    pub fn with_outer(mut self, outer: &'a Versions) -> Self {
        self.outer = Some(outer);
        self
    }

    pub fn with_level(mut self, level: &'a Dependencies) -> Self {
        self.levels.push(level);
        self
    }

    /// Pretend `name@version` sits at the base level.
    pub fn pin(mut self, name: &'a str, version: &'a str) -> Self {
        self.pinned = Some((name, version));
        self
    }

    pub fn push(&mut self, level: &'a Dependencies) {
        self.levels.push(level);
    }

    pub fn pop(&mut self) {
        self.levels.pop();
    }

    /// Version that `name` resolves to from the innermost level.
    pub fn resolve(&self, name: &str) -> Option<&'a str> {
        self.levels
            .iter()
            .rev()
            .copied()
            .find_map(|level| level.get(name).map(|node| node.version.as_str()))
            .or_else(|| {
                self.pinned
                    .filter(|(pinned, _)| *pinned == name)
                    .map(|(_, version)| version)
            })
            .or_else(|| {
                self.outer
                    .and_then(|outer| outer.get(name))
                    .map(String::as_str)
            })
    }

    /// Check `node` and its whole subtree, with `node` placed in the
    /// innermost level.
    pub fn subtree_resolves(&mut self, node: &'a TreeNode) -> bool {
        let mut trail = Vec::new();
        self.find_violation(node, &mut trail).is_none()
    }

    /// First `requires` entry in `node`'s subtree that fails to resolve.
    ///
    /// `trail` holds the names leading to `node` and is restored on return.
    pub fn find_violation(
        &mut self,
        node: &'a TreeNode,
        trail: &mut Vec<&'a str>,
    ) -> Option<Violation> {
        trail.push(&node.name);
        self.push(&node.dependencies);

        let mut violation = node.requires.iter().find_map(|(name, expected)| {
            let found = self.resolve(name);
            (found != Some(expected.as_str())).then(|| Violation {
                path: trail.iter().map(|s| s.to_string()).collect(),
                dependency: name.clone(),
                expected: expected.clone(),
                found: found.map(str::to_string),
            })
        });
        if violation.is_none() {
            violation = node
                .dependencies
                .values()
                .find_map(|child| self.find_violation(child, trail));
        }

        self.pop();
        trail.pop();
        violation
    }
}

/// `above` overlaid with the versions placed in `level`.
pub fn overlay(above: &Versions, level: &Dependencies) -> Versions {
    let mut visible = above.clone();
    for (name, node) in level {
        visible.insert(name.clone(), node.version.clone());
    }
    visible
}
