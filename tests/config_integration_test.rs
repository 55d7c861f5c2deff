//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX` so they do not
//! interfere with each other.

use malxport::config::{load_config, load_config_from_str};
use malxport::core::compile::UnmappedPolicy;
use malxport::domain::KindGroup;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("MALXPORT_APPLICATION_LOG_LEVEL");
    std::env::remove_var("MALXPORT_APPLICATION_DRY_RUN");
    std::env::remove_var("MALXPORT_EXPORT_UNMAPPED_ENTRIES");
    std::env::remove_var("MALXPORT_EXPORT_USER_NAME");
    std::env::remove_var("MALXPORT_EXPORT_FILE_STEM");
    std::env::remove_var("TEST_MAL_USERNAME");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"
dry_run = true

[export]
update_on_import = false
unmapped_entries = "comment"
user_id = 1234
user_name = "listkeeper"
output_dir = "/tmp/malxport-out"
file_stem = "mylist"

[logging]
local_enabled = true
local_path = "/tmp/malxport-logs"
local_rotation = "never"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);

    assert!(!config.export.update_on_import);
    assert_eq!(config.export.unmapped_entries, UnmappedPolicy::Comment);
    assert_eq!(config.export.user_id, Some(1234));
    assert_eq!(config.export.user_name.as_deref(), Some("listkeeper"));
    assert_eq!(
        config.export.output_path(Some(KindGroup::Text)),
        PathBuf::from("/tmp/malxport-out/mylist-manga.xml")
    );

    let options = config.export.compile_options();
    assert!(!options.update_on_import);
    assert_eq!(options.unmapped, UnmappedPolicy::Comment);

    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "never");
}

#[test]
fn test_load_minimal_config_uses_defaults() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[export]\nuser_name = \"someone\"\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert!(!config.application.dry_run);
    assert!(config.export.update_on_import);
    assert_eq!(config.export.unmapped_entries, UnmappedPolicy::Keep);
    assert_eq!(config.export.user_id, None);
    assert_eq!(
        config.export.output_path(None),
        PathBuf::from("./malxml.xml")
    );
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_MAL_USERNAME", "from-env");

    let result = load_config_from_str("[export]\nuser_name = \"${TEST_MAL_USERNAME}\"\n");
    cleanup_env_vars();

    let config = result.unwrap();
    assert_eq!(config.export.user_name.as_deref(), Some("from-env"));
}

#[test]
fn test_missing_substitution_variable_is_error() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let result = load_config_from_str("[export]\nuser_name = \"${TEST_MAL_USERNAME}\"\n");
    let err = result.unwrap_err().to_string();
    assert!(err.contains("TEST_MAL_USERNAME"));
}

#[test]
fn test_env_overrides_win_over_file() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("MALXPORT_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("MALXPORT_EXPORT_UNMAPPED_ENTRIES", "comment");
    std::env::set_var("MALXPORT_EXPORT_FILE_STEM", "override");

    let result = load_config_from_str(
        "[application]\nlog_level = \"debug\"\n[export]\nfile_stem = \"file\"\n",
    );
    cleanup_env_vars();

    let config = result.unwrap();
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.export.unmapped_entries, UnmappedPolicy::Comment);
    assert_eq!(config.export.file_stem, "override");
}

#[test]
fn test_invalid_env_override_is_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("MALXPORT_APPLICATION_LOG_LEVEL", "chatty");

    let result = load_config_from_str("");
    cleanup_env_vars();

    assert!(result.is_err());
}

#[test]
fn test_invalid_values_are_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    for contents in [
        "[application]\nlog_level = \"loud\"\n",
        "[export]\nfile_stem = \"\"\n",
        "[export]\nfile_stem = \"a/b\"\n",
        "[export]\nunmapped_entries = \"skip\"\n",
        "[export]\nuser_id = -1\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
        "not toml at all = = =",
    ] {
        assert!(
            load_config_from_str(contents).is_err(),
            "accepted invalid config: {contents}"
        );
    }
}

#[test]
fn test_missing_file() {
    let result = load_config("/nonexistent/path/malxport.toml");
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Configuration file not found"));
}
