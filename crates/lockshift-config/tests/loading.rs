//! Layered config loading: overrides > environment > file > defaults.

use std::fs;
use std::path::PathBuf;

use lockshift_config::{ConfigError, ConfigOverrides, DEFAULT_REGISTRY, ExportConfig, LockSchema};
use serial_test::serial;
use tempfile::TempDir;

fn clear_env() {
    unsafe {
        std::env::remove_var("LOCKSHIFT_SCHEMA");
        std::env::remove_var("LOCKSHIFT_REGISTRY");
        std::env::remove_var("LOCKSHIFT_OUTPUT");
    }
}

#[test]
#[serial]
fn test_defaults_when_no_file() {
    clear_env();
    let temp = TempDir::new().unwrap();

    let config = ExportConfig::load(temp.path(), None, &ConfigOverrides::default()).unwrap();
    assert_eq!(config, ExportConfig::default());
    assert_eq!(config.registry, DEFAULT_REGISTRY);
}

#[test]
#[serial]
fn test_file_overrides_defaults() {
    clear_env();
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("lockshift.config.json"),
        r#"{
            "schema": "yarn.lock@v1",
            "registry": "https://npm.example.com",
            "output": "locks/yarn.lock"
        }"#,
    )
    .unwrap();

    let config = ExportConfig::load(temp.path(), None, &ConfigOverrides::default()).unwrap();
    assert_eq!(config.schema, LockSchema::YarnLockV1);
    assert_eq!(config.registry, "https://npm.example.com/");
    assert_eq!(config.output, Some(PathBuf::from("locks/yarn.lock")));
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("lockshift.config.json"),
        r#"{"registry": "https://file.example.com/"}"#,
    )
    .unwrap();

    unsafe {
        std::env::set_var("LOCKSHIFT_REGISTRY", "https://env.example.com/");
    }
    let config = ExportConfig::load(temp.path(), None, &ConfigOverrides::default());
    clear_env();

    assert_eq!(config.unwrap().registry, "https://env.example.com/");
}

#[test]
#[serial]
fn test_overrides_win() {
    clear_env();
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("lockshift.config.json"),
        r#"{"schema": "yarn.lock@v1"}"#,
    )
    .unwrap();

    unsafe {
        std::env::set_var("LOCKSHIFT_SCHEMA", "yarn.lock@v1");
    }
    let overrides = ConfigOverrides {
        schema: Some(LockSchema::PackageLockV1),
        ..ConfigOverrides::default()
    };
    let config = ExportConfig::load(temp.path(), None, &overrides);
    clear_env();

    assert_eq!(config.unwrap().schema, LockSchema::PackageLockV1);
}

#[test]
#[serial]
fn test_explicit_config_path() {
    clear_env();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.json");
    fs::write(&path, r#"{"output": "out.json"}"#).unwrap();

    let config =
        ExportConfig::load(temp.path(), Some(&path), &ConfigOverrides::default()).unwrap();
    assert_eq!(config.output, Some(PathBuf::from("out.json")));

    let missing = temp.path().join("missing.json");
    let err =
        ExportConfig::load(temp.path(), Some(&missing), &ConfigOverrides::default()).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(p) if p == missing));
}

#[test]
#[serial]
fn test_invalid_schema_in_file() {
    clear_env();
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("lockshift.config.json"),
        r#"{"schema": "pnpm-lock.yaml@v6"}"#,
    )
    .unwrap();

    let err = ExportConfig::load(temp.path(), None, &ConfigOverrides::default()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
#[serial]
fn test_invalid_registry_is_rejected() {
    clear_env();
    let temp = TempDir::new().unwrap();
    let overrides = ConfigOverrides {
        registry: Some("ftp://mirror".to_string()),
        ..ConfigOverrides::default()
    };

    let err = ExportConfig::load(temp.path(), None, &overrides).unwrap_err();
    assert!(err.to_string().contains("Invalid value for 'registry'"));
}
