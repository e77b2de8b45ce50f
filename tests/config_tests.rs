use std::fs;

use taskguard::config::settings::{Config, ConfigError};
use tempfile::TempDir;

#[test]
fn config_loads_from_toml_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
        [schedule]
        path = "/etc/taskguard/penalties.yaml"

        [ledger]
        path = "/var/lib/taskguard/decisions.jsonl"
        max_file_bytes = 1048576
        max_rotated_files = 3
    "#;
    fs::write(&config_path, toml_content).unwrap();

    let config = Config::from_file(&config_path).unwrap();

    assert_eq!(
        config.schedule.path.as_deref(),
        Some(std::path::Path::new("/etc/taskguard/penalties.yaml"))
    );
    assert_eq!(config.ledger.max_file_bytes, 1_048_576);
    assert_eq!(config.ledger.max_rotated_files, 3);
}

#[test]
fn config_uses_defaults_when_sections_missing() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[schedule]\n").unwrap();

    let config = Config::from_file(&config_path).unwrap();
    assert!(config.schedule.path.is_none());
    assert_eq!(config.ledger.max_file_bytes, 10 * 1024 * 1024);
    assert_eq!(config.ledger.max_rotated_files, 5);
}

#[test]
fn missing_file_is_an_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = Config::from_file(&temp_dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::IoError(_)));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[ledger\nmax_file_bytes = oops").unwrap();

    let err = Config::from_file(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[test]
fn config_round_trips_through_toml() {
    let config = Config::default();
    let rendered = config.to_toml().unwrap();
    let reparsed: Config = toml::from_str(&rendered).unwrap();
    assert_eq!(reparsed.ledger.max_file_bytes, config.ledger.max_file_bytes);
    assert_eq!(reparsed.schedule.path, config.schedule.path);
}
