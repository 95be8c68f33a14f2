//! Error handling for the lockshift CLI.
//!
//! `CliError` wraps the library errors via `#[from]` so commands can use `?`
//! throughout. [`ResultExt`] attaches paths and context on the way up, and
//! [`cli_error_to_miette`] turns the final error into a diagnostic.
//!
//! ```rust,no_run
//! use lockshift_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

mod report;

use std::path::PathBuf;

use lockshift_config::ConfigError;
use lockshift_graph::ConvertError;
use lockshift_lockfile::LockfileError;
use thiserror::Error;

pub use report::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Lockfile(#[from] LockfileError),

    #[error("Conversion failed: {0}")]
    Convert(#[from] ConvertError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Prefix the message with `msg`.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            CliError::Io(io_err) => {
                CliError::Custom(format!("{}: {io_err}", path.as_ref().display()))
            }
            other => other,
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{msg}: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_library_errors() {
        let err: CliError = ConfigError::UnknownSchema("x".to_string()).into();
        assert!(matches!(err, CliError::Config(_)));

        let err: CliError = LockfileError::LockfileNotFound(PathBuf::from("/p")).into();
        assert!(matches!(err, CliError::Lockfile(_)));
        assert_eq!(err.to_string(), "pnpm lockfile not found in /p");

        let err: CliError = ConvertError::SnapshotNotFound {
            name: "a".to_string(),
            identifier: "1.0.0".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("Conversion failed: package not found in snapshots"));
    }

    #[test]
    fn test_result_ext_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        let err = result.with_path("/out/package-lock.json").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(ref p) if p == std::path::Path::new("/out/package-lock.json")));

        let denied: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = denied.with_path("/out/yarn.lock").unwrap_err();
        assert_eq!(err.to_string(), "/out/yarn.lock: denied");
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::UnknownSchema("v9".to_string()));
        let msg = result.context("Loading config").unwrap_err().to_string();
        assert!(msg.starts_with("Loading config: Configuration error"));
    }
}
