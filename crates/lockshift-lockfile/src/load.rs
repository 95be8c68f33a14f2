//! Filesystem entry points.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{LockfileError, Result};
use crate::manifest::{MANIFEST_NAME, PackageManifest};
use crate::pnpm::{LOCKFILE_NAME, LoadOptions, LoadedLockfile, parse_lockfile};

/// Maximum accepted size for `pnpm-lock.yaml` (64MB).
const MAX_LOCKFILE_SIZE: u64 = 64 * 1024 * 1024;

/// Maximum accepted size for `package.json` (10MB).
const MAX_MANIFEST_SIZE: u64 = 10 * 1024 * 1024;

/// Read and parse `<dir>/pnpm-lock.yaml`.
pub fn load_lockfile(dir: &Path, options: &LoadOptions) -> Result<LoadedLockfile> {
    let path = dir.join(LOCKFILE_NAME);
    if !path.is_file() {
        return Err(LockfileError::LockfileNotFound(dir.to_path_buf()));
    }
    debug!(path = %path.display(), "reading lockfile");
    let text = read_capped(&path, MAX_LOCKFILE_SIZE)?;
    parse_lockfile(&text, options)
}

/// Read `<dir>/package.json`.
pub fn read_manifest(dir: &Path) -> Result<PackageManifest> {
    let path = dir.join(MANIFEST_NAME);
    let text = read_capped(&path, MAX_MANIFEST_SIZE)?;
    PackageManifest::parse(&text, &path)
}

fn read_capped(path: &Path, limit: u64) -> Result<String> {
    let io_error = |source| LockfileError::Io {
        path: path.to_path_buf(),
        source,
    };
    let metadata = fs::metadata(path).map_err(io_error)?;
    if metadata.len() > limit {
        return Err(LockfileError::TooLarge {
            path: path.to_path_buf(),
            limit_mb: limit / 1024 / 1024,
        });
    }
    fs::read_to_string(path).map_err(io_error)
}
