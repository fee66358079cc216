//! Tests for configuration loading

use mes_domain::error::Error;
use mes_infrastructure::config::{AppConfig, ConfigLoader, validate_app_config};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("mes.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.json_format);
    assert_eq!(config.cache.provider, "memory");
    assert_eq!(config.messaging.active_adapter, "internal");
    assert_eq!(config.messaging.adapters, vec!["internal"]);
    assert!(validate_app_config(&config).is_ok());
}

#[test]
fn test_load_from_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[logging]
level = "debug"
json_format = false

[cache]
provider = "null"

[messaging]
active_adapter = "null"
adapters = ["internal", "null"]
"#,
    );

    let config = ConfigLoader::new().with_config_path(&path).load().unwrap();

    assert_eq!(config.logging.level, "debug");
    assert!(!config.logging.json_format);
    assert_eq!(config.cache.provider, "null");
    assert_eq!(config.messaging.active_adapter, "null");
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[cache]\nprovider = \"null\"\n");

    let config = ConfigLoader::new().with_config_path(&path).load().unwrap();

    assert_eq!(config.cache.provider, "null");
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.messaging.active_adapter, "internal");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config = ConfigLoader::new()
        .with_config_path(dir.path().join("absent.toml"))
        .load()
        .unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[logging]\nlevel = \"loud\"\n");

    let err = ConfigLoader::new().with_config_path(&path).load().unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_active_adapter_must_be_configured() {
    let mut config = AppConfig::default();
    config.messaging.active_adapter = "kafka".to_string();

    let err = validate_app_config(&config).unwrap_err();
    assert!(err.to_string().contains("kafka"));
}

#[test]
fn test_empty_cache_provider_is_rejected() {
    let mut config = AppConfig::default();
    config.cache.provider = " ".to_string();
    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_malformed_file_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[cache\nprovider = ");

    let err = ConfigLoader::new().with_config_path(&path).load().unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.toml");
    let mut config = AppConfig::default();
    config.cache.provider = "null".to_string();
    config.messaging.adapters = vec!["internal".to_string(), "null".to_string()];

    let loader = ConfigLoader::new().with_config_path(&path);
    loader.save_to_file(&config, &path).unwrap();

    assert_eq!(loader.load().unwrap(), config);
}

#[test]
#[ignore = "mutates process environment; run with --test-threads=1"]
fn test_env_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[cache]\nprovider = \"memory\"\n");

    // SAFETY: test runs single-threaded per the ignore note
    unsafe {
        std::env::set_var("MES__CACHE__PROVIDER", "null");
    }
    let result = ConfigLoader::new().with_config_path(&path).load();
    unsafe {
        std::env::remove_var("MES__CACHE__PROVIDER");
    }

    assert_eq!(result.unwrap().cache.provider, "null");
}
