//! Tests for configuration module

use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn create_temp_config_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.scheduler.batch_size, 3);
    assert_eq!(config.scheduler.batch_setup_delay_ms, 5000);
    assert_eq!(config.scheduler.per_item_delay_ms, 500);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 3000);
    assert!(config.server.allowed_origins.is_empty());
}

#[test]
fn test_from_toml_str_valid() {
    let toml = r#"
        [scheduler]
        batch_size = 5
        batch_setup_delay_ms = 100

        [server]
        port = 8080
        allowed_origins = ["http://localhost:5173"]
    "#;

    let config = Config::from_toml_str(toml).expect("Failed to parse valid TOML");
    assert_eq!(config.scheduler.batch_size, 5);
    assert_eq!(config.scheduler.batch_setup_delay_ms, 100);
    // Unspecified values fall back to defaults
    assert_eq!(config.scheduler.per_item_delay_ms, 500);
    assert_eq!(config.server.port, 8080);
    assert_eq!(
        config.server.allowed_origins,
        vec!["http://localhost:5173".to_string()]
    );
}

#[test]
fn test_from_toml_str_empty_uses_defaults() {
    let config = Config::from_toml_str("").expect("Empty TOML should parse");
    assert_eq!(config.scheduler.batch_size, 3);
    assert_eq!(config.server.port, 3000);
}

#[test]
fn test_from_toml_str_rejects_zero_batch_size() {
    let toml = r#"
        [scheduler]
        batch_size = 0
    "#;

    let result = Config::from_toml_str(toml);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("batch_size must be at least 1"));
}

#[test]
fn test_from_file_missing_file_uses_defaults() {
    let config = Config::from_file(std::path::Path::new("/nonexistent/ingestq.toml"))
        .expect("Missing file should fall back to defaults");
    assert_eq!(config.scheduler.batch_size, 3);
}

#[test]
fn test_from_file_reads_toml() {
    let file = create_temp_config_file(
        r#"
        [scheduler]
        batch_size = 7

        [server]
        host = "127.0.0.1"
    "#,
    );

    let config = Config::from_file(file.path()).expect("Failed to load config file");
    assert_eq!(config.scheduler.batch_size, 7);
    assert_eq!(config.server.host, "127.0.0.1");
}

#[test]
fn test_validate_rejects_empty_host() {
    let mut config = Config::default();
    config.server.host = String::new();
    assert!(config.validate().is_err());
}
