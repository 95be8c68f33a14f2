//! # lockshift-lockfile
//!
//! Readers for the two project files a conversion starts from:
//!
//! - `pnpm-lock.yaml` (lockfile versions 5.x and 6.x, single projects and
//!   workspaces) into a [`SnapshotGraph`](lockshift_graph::SnapshotGraph) and
//!   root dependency set
//! - `package.json` into the project's name and version
//!
//! ```rust,no_run
//! use std::path::Path;
//! use lockshift_lockfile::{LoadOptions, load_lockfile, read_manifest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = Path::new(".");
//! let lockfile = load_lockfile(dir, &LoadOptions::default())?;
//! let metadata = read_manifest(dir)?.into_metadata();
//! let conversion = lockshift_graph::convert(&lockfile.graph, &lockfile.roots, metadata)?;
//! println!("{} packages", conversion.tree.node_count());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod load;
pub mod manifest;
pub mod pnpm;
mod raw;

pub use error::{LockfileError, Result};
pub use load::{load_lockfile, read_manifest};
pub use manifest::{MANIFEST_NAME, PackageManifest};
pub use pnpm::{LOCKFILE_NAME, LoadOptions, LoadedLockfile, parse_lockfile};
