//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MalxportConfig;
use crate::domain::errors::MalxportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into MalxportConfig
/// 4. Applies environment variable overrides (MALXPORT_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use malxport::config::loader::load_config;
///
/// let config = load_config("malxport.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MalxportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MalxportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MalxportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from TOML text
///
/// Runs the same substitution, override and validation steps as
/// [`load_config`].
///
/// # Errors
///
/// Returns an error if substitution, parsing or validation fails
pub fn load_config_from_str(contents: &str) -> Result<MalxportConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: MalxportConfig = toml::from_str(&contents)
        .map_err(|e| MalxportError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        MalxportError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| MalxportError::Other(format!("Invalid substitution pattern: {}", e)))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(MalxportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    let mut result = lines.join("\n");
    if input.ends_with('\n') {
        result.push('\n');
    }
    Ok(result)
}

/// Applies environment variable overrides using MALXPORT_* prefix
///
/// Environment variables follow the pattern: MALXPORT_<SECTION>_<KEY>
/// For example: MALXPORT_EXPORT_USER_NAME, MALXPORT_LOGGING_LOCAL_PATH
///
/// # Errors
///
/// Returns an error if an override holds a value of the wrong type
fn apply_env_overrides(config: &mut MalxportConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("MALXPORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("MALXPORT_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Export overrides
    if let Ok(val) = std::env::var("MALXPORT_EXPORT_UPDATE_ON_IMPORT") {
        config.export.update_on_import = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("MALXPORT_EXPORT_UNMAPPED_ENTRIES") {
        config.export.unmapped_entries = val.parse().map_err(|e| {
            MalxportError::Configuration(format!("MALXPORT_EXPORT_UNMAPPED_ENTRIES: {}", e))
        })?;
    }
    if let Ok(val) = std::env::var("MALXPORT_EXPORT_USER_ID") {
        let id = val.trim().parse().map_err(|_| {
            MalxportError::Configuration(format!(
                "MALXPORT_EXPORT_USER_ID must be a non-negative integer, got '{}'",
                val
            ))
        })?;
        config.export.user_id = Some(id);
    }
    if let Ok(val) = std::env::var("MALXPORT_EXPORT_USER_NAME") {
        config.export.user_name = Some(val);
    }
    if let Ok(val) = std::env::var("MALXPORT_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Ok(val) = std::env::var("MALXPORT_EXPORT_FILE_STEM") {
        config.export.file_stem = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("MALXPORT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("MALXPORT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("MALXPORT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
