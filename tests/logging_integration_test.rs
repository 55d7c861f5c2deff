//! Integration tests for logging functionality

use malxport::config::LoggingConfig;
use malxport::logging::{init_logging, parse_log_level};
use tempfile::TempDir;
use tracing::Level;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "logs");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_parse_log_level_from_config_values() {
    assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("WARN").unwrap(), Level::WARN);
    assert!(parse_log_level("verbose").is_err());
}

// The global subscriber can only be installed once per process, so every
// init_logging scenario runs inside this single test.
#[test]
fn test_init_logging_with_local_files() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    assert!(!log_path.exists());
    assert!(init_logging("verbose", &config).is_err());

    let bad_rotation = LoggingConfig {
        local_rotation: "weekly".to_string(),
        ..config.clone()
    };
    assert!(init_logging("info", &bad_rotation).is_err());

    let guard = init_logging("debug", &config).unwrap();
    assert!(log_path.is_dir());

    tracing::info!(target: "malxport", entries = 3, "Batch compiled");
    drop(guard);

    let written: Vec<_> = std::fs::read_dir(&log_path)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    assert!(written.iter().any(|name| name.starts_with("malxport.log")));

    // A second subscriber cannot be installed
    let console_only = LoggingConfig::default();
    assert!(init_logging("info", &console_only).is_err());
}
