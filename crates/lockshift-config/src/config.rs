use std::fs;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::schema::LockSchema;

pub use lockshift_graph::DEFAULT_REGISTRY;

/// Config file looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "lockshift.config.json";

/// Prefix for environment overrides (`LOCKSHIFT_SCHEMA`, `LOCKSHIFT_REGISTRY`, ...).
pub const ENV_PREFIX: &str = "LOCKSHIFT_";

/// Settings for one export run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    #[serde(default)]
    pub schema: LockSchema,

    /// Registry base used for tarball URLs pnpm did not record.
    #[serde(default = "default_registry")]
    pub registry: String,

    /// Output file; relative paths resolve against the project directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

fn default_registry() -> String {
    DEFAULT_REGISTRY.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            schema: LockSchema::default(),
            registry: default_registry(),
            output: None,
        }
    }
}

/// Values from command-line flags. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<LockSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl ExportConfig {
    /// Load configuration from multiple sources.
    /// Priority: overrides > environment variables > config file > defaults
    ///
    /// `config_path` names the config file explicitly; otherwise
    /// `<dir>/lockshift.config.json` is used when it exists.
    pub fn load(dir: &Path, config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = dir.join(CONFIG_FILE_NAME);
                default_path.exists().then_some(default_path)
            }
        };

        if let Some(path) = &config_file {
            let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), "merging config file");
            figment = figment.merge(Json::string(&text));
        }

        figment = figment
            .merge(Env::prefixed(ENV_PREFIX).split("_"))
            .merge(Serialized::defaults(overrides));

        let mut config: Self = figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: if e.path.is_empty() {
                "configuration".to_string()
            } else {
                e.path.join(".")
            },
            value: e.kind.to_string(),
            hint: format!("Check {CONFIG_FILE_NAME} syntax and {ENV_PREFIX}* variables"),
        })?;
        config.registry = normalize_registry(&config.registry)?;

        debug!(schema = %config.schema, registry = %config.registry, "export config loaded");
        Ok(config)
    }
}

/// Registry URLs must be http(s) and end with `/`.
pub fn normalize_registry(registry: &str) -> Result<String> {
    let trimmed = registry.trim();
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
        return Err(ConfigError::InvalidValue {
            field: "registry".to_string(),
            value: registry.to_string(),
            hint: "Use an http:// or https:// URL".to_string(),
        });
    }
    if trimmed.ends_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_and_skipped_output() {
        let value = serde_json::to_value(ExportConfig::default()).unwrap();
        assert_eq!(value["schema"], "package-lock.json@v1");
        assert_eq!(value["registry"], DEFAULT_REGISTRY);
        assert!(value.get("output").is_none());

        let overrides = serde_json::to_value(ConfigOverrides::default()).unwrap();
        assert_eq!(overrides, serde_json::json!({}));
    }

    #[test]
    fn test_default_registry_matches_tarball_derivation() {
        let config = ExportConfig::default();
        assert_eq!(config.registry, lockshift_graph::DEFAULT_REGISTRY);
        assert_eq!(
            lockshift_graph::registry_tarball(&config.registry, "left-pad", "1.3.0"),
            "https://registry.npmjs.org/left-pad/-/left-pad-1.3.0.tgz"
        );
    }

    #[test]
    fn test_normalize_registry() {
        assert_eq!(
            normalize_registry("https://npm.example.com").unwrap(),
            "https://npm.example.com/"
        );
        assert_eq!(normalize_registry(DEFAULT_REGISTRY).unwrap(), DEFAULT_REGISTRY);
        assert!(matches!(
            normalize_registry("npm.example.com"),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "registry"
        ));
    }
}
