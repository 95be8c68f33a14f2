//! Output lockfile formats.

pub mod package_lock;
pub mod yarn_lock;

pub use package_lock::{LockDependency, PackageLock};
pub use yarn_lock::{YarnEntry, YarnLock};
