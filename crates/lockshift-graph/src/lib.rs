//! # lockshift-graph
//!
//! Pure data structures and algorithms that compile a pnpm snapshot graph
//! into an npm-style nested dependency tree.
//!
//! This crate performs no I/O. Lockfile parsing lives in `lockshift-lockfile`
//! and the command-line surface lives in `lockshift-cli`.
//!
//! ## Overview
//!
//! A pnpm lockfile describes a flat graph: every package instance is keyed by
//! a dependency path and lists the paths it depends on. npm's `package-lock.json`
//! (v1) instead describes a nested tree that Node's module resolution walks
//! from the requiring package outwards. Compiling one into the other happens in
//! four stages:
//!
//! ```text
//!   SnapshotGraph + root dependencies
//!              │
//!              ▼
//!   ┌─────────────────────┐
//!   │  expand             │  graph → naive nested tree (cycle-safe)
//!   └──────────┬──────────┘
//!              ▼
//!   ┌─────────────────────┐
//!   │  hoist::flatten     │  dedup + conflict-aware promotion to fixpoint
//!   └──────────┬──────────┘
//!              ▼
//!   ┌─────────────────────┐
//!   │  requires::finalize │  recompute `requires`, verify resolution
//!   └──────────┬──────────┘
//!              ▼
//!   ┌─────────────────────┐
//!   │  schema::*          │  package-lock.json v1 / yarn.lock v1
//!   └─────────────────────┘
//! ```
//!
//! Every stage keeps one contract intact: each `requires` entry of each node
//! resolves, nearest ancestor first, to a node of exactly that version.
//!
//! ## Quick Start
//!
//! ```rust
//! use lockshift_graph::{convert, ProjectMetadata, RootDependencies, Snapshot, SnapshotGraph};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = SnapshotGraph::new();
//! graph.insert_key("/left-pad/1.3.0", Snapshot::builder("left-pad", "1.3.0").build())?;
//!
//! let mut roots = RootDependencies::new();
//! roots.insert("left-pad".to_string(), "1.3.0".to_string());
//!
//! let conversion = convert(&graph, &roots, ProjectMetadata::new("app", "1.0.0"))?;
//! assert!(conversion.tree.dependencies.contains_key("left-pad"));
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod dep_path;
pub mod error;
pub mod expand;
pub mod hoist;
pub mod requires;
pub mod schema;
pub mod scope;
pub mod snapshot;
pub mod tree;
pub mod warning;

pub use convert::{Conversion, PLACEHOLDER_NAME, PLACEHOLDER_VERSION, ProjectMetadata, convert};
pub use dep_path::{DepPath, DepPathError, normalize};
pub use error::{ConvertError, Result};
pub use expand::{Expansion, expand};
pub use hoist::{HoistStats, flatten};
pub use requires::{finalize, verify};
pub use schema::{PackageLock, YarnLock};
pub use scope::{ResolutionScope, Versions, Violation};
pub use snapshot::{
    DEFAULT_REGISTRY, Resolution, RootDependencies, SUPPORTED_LOCKFILE_VERSION, Snapshot,
    SnapshotBuilder, SnapshotGraph, registry_tarball,
};
pub use tree::{Dependencies, LockTree, Requires, TreeNode};
pub use warning::Warning;
