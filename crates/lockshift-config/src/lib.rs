//! Export configuration for lockshift.
//!
//! Settings come from four layers, later ones winning:
//!
//! 1. built-in defaults
//! 2. `lockshift.config.json` in the project directory (or `--config`)
//! 3. `LOCKSHIFT_*` environment variables
//! 4. command-line overrides
//!
//! ```rust,no_run
//! use std::path::Path;
//! use lockshift_config::{ConfigOverrides, ExportConfig, LockSchema};
//!
//! let overrides = ConfigOverrides {
//!     schema: Some(LockSchema::YarnLockV1),
//!     ..ConfigOverrides::default()
//! };
//! let config = ExportConfig::load(Path::new("."), None, &overrides).unwrap();
//! assert_eq!(config.schema.file_name(), "yarn.lock");
//! ```

pub mod config;
pub mod error;
pub mod schema;

pub use config::{
    CONFIG_FILE_NAME, ConfigOverrides, DEFAULT_REGISTRY, ENV_PREFIX, ExportConfig,
    normalize_registry,
};
pub use error::{ConfigError, Result};
pub use schema::LockSchema;
