//! Tests for the configuration module.
//!
//! This module contains tests for configuration loading, validation, and usage.

use super::test_utils::TestFixture;
use crate::config::{AppConfig, ConfigLoader, Validate};
use crate::error::config::ConfigError;

/// Test that default configuration can be created and is valid.
#[test]
fn test_default_config_is_valid() {
    let config = AppConfig::default();
    assert!(config.validate().is_ok());
}

/// Test that configuration validation catches invalid values.
#[test]
fn test_config_validation() {
    let mut config = AppConfig::default();

    config.log.level = "loud".to_string();
    assert!(config.validate().is_err());

    config.log.level = "debug".to_string();
    config.dictionary.max_key_chars = 0;
    assert!(config.validate().is_err());

    config.dictionary.max_key_chars = 64;
    assert!(config.validate().is_ok());
}

/// Test loading configuration from a TOML file.
#[test]
fn test_load_config_from_file() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "runetrie.toml",
            r#"
            [dictionary]
            path = "/usr/share/dict/words"
            separator = ","
            max_key_chars = 32

            [log]
            level = "debug"
            "#,
        )
        .unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "RUNETRIE_TEST_FILE");
    let config = loader.load().unwrap();

    assert_eq!(
        config.dictionary.path.as_deref(),
        Some(std::path::Path::new("/usr/share/dict/words"))
    );
    assert_eq!(config.dictionary.separator, ",");
    assert_eq!(config.dictionary.max_key_chars, 32);
    assert_eq!(config.log.level, "debug");

    // Other values should be defaults
    assert_eq!(config.dictionary.comment_prefix, "#");
    assert!(!config.log.json);
}

/// Test loading configuration from a JSON file.
#[test]
fn test_load_config_from_json() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file("runetrie.json", r#"{ "log": { "json": true } }"#)
        .unwrap();

    let config = ConfigLoader::new(Some(&config_path), "RUNETRIE_TEST_JSON")
        .load()
        .unwrap();

    assert!(config.log.json);
    assert_eq!(config.dictionary.max_key_chars, 256);
}

/// Test that an invalid value in a file fails validation.
#[test]
fn test_load_invalid_config() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file("bad.toml", "[log]\nlevel = \"loud\"\n")
        .unwrap();

    let result = ConfigLoader::new(Some(&config_path), "RUNETRIE_TEST_BAD").load();
    assert!(matches!(
        result,
        Err(ConfigError::Invalid { key: "log.level", .. })
    ));
}

/// Test that a missing file is reported as such.
#[test]
fn test_missing_config_file() {
    let fixture = TestFixture::new().unwrap();
    let missing = fixture.temp_dir.path().join("absent.toml");

    let result = ConfigLoader::new(Some(&missing), "RUNETRIE_TEST_MISSING").load();
    assert!(matches!(result, Err(ConfigError::FileNotFound(path)) if path == missing));
}

/// Test that unknown file extensions are rejected.
#[test]
fn test_unsupported_extension() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture.create_file("runetrie.ini", "").unwrap();

    let result = ConfigLoader::new(Some(&config_path), "RUNETRIE_TEST_INI").load();
    assert!(matches!(result, Err(ConfigError::UnsupportedFormat(path)) if path == config_path));
}

/// Test that environment variables override defaults.
#[test]
fn test_env_override() {
    std::env::set_var("RUNETRIE_TEST_ENV__LOG__LEVEL", "warn");

    let config = ConfigLoader::new(None::<&str>, "RUNETRIE_TEST_ENV")
        .load()
        .unwrap();

    std::env::remove_var("RUNETRIE_TEST_ENV__LOG__LEVEL");
    assert_eq!(config.log.level, "warn");
}

/// Test that the default configuration survives a TOML round trip.
#[test]
fn test_default_config_serializes_to_toml() {
    let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
    let parsed: AppConfig = toml::from_str(&text).unwrap();
    assert!(parsed.validate().is_ok());
    assert_eq!(parsed.dictionary.separator, "\t");
}
