//! Grandchild inventory of one tree level.

use std::collections::BTreeMap;

use crate::dep_path::DepPath;
use crate::tree::Dependencies;

/// For every name held by some child of a level: which children hold it, and
/// which dependency path each copy is.
#[derive(Debug, Default)]
pub(crate) struct CandidateIndex {
    holders: BTreeMap<String, Vec<(String, DepPath)>>,
}

impl CandidateIndex {
    pub(crate) fn build(level: &Dependencies) -> Self {
        let mut holders: BTreeMap<String, Vec<(String, DepPath)>> = BTreeMap::new();
        for (child_key, child) in level {
            for (name, grandchild) in &child.dependencies {
                holders
                    .entry(name.clone())
                    .or_default()
                    .push((child_key.clone(), grandchild.dep_path.clone()));
            }
        }
        Self { holders }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &[(String, DepPath)])> {
        self.holders
            .iter()
            .map(|(name, holders)| (name.as_str(), holders.as_slice()))
    }

    /// Names held under exactly one dependency path, with that path.
    pub(crate) fn unambiguous(&self) -> impl Iterator<Item = (&str, &DepPath)> {
        self.iter().filter_map(|(name, holders)| {
            let (_, first) = holders.first()?;
            holders
                .iter()
                .all(|(_, path)| path == first)
                .then_some((name, first))
        })
    }
}
