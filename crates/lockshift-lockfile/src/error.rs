//! Errors raised while reading project files.

use std::path::PathBuf;

use lockshift_graph::ConvertError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LockfileError>;

#[derive(Debug, Error)]
pub enum LockfileError {
    #[error("pnpm lockfile not found in {}", .0.display())]
    LockfileNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} exceeds maximum size of {limit_mb}MB", path.display())]
    TooLarge { path: PathBuf, limit_mb: u64 },

    #[error("invalid pnpm lockfile: {0}")]
    InvalidYaml(String),

    #[error("invalid package.json at {}: {message}", path.display())]
    InvalidManifest { path: PathBuf, message: String },

    #[error(transparent)]
    Convert(#[from] ConvertError),
}
