//! Configuration schema types
//!
//! This module defines the configuration structure for malxport.

use crate::core::compile::{CompileOptions, UnmappedPolicy};
use crate::core::export::UserIdentity;
use crate::domain::entry::KindGroup;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main malxport configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MalxportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MalxportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (compile but don't write output files)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Value of every record's `update_on_import` flag (default: true)
    /// When true, importers overwrite entries already on the list.
    #[serde(default = "default_true")]
    pub update_on_import: bool,

    /// Handling of entries without a MyAnimeList id (keep or comment)
    #[serde(default)]
    pub unmapped_entries: UnmappedPolicy,

    /// Numeric user id written into the header
    #[serde(default)]
    pub user_id: Option<u64>,

    /// User name written into the header
    #[serde(default)]
    pub user_name: Option<String>,

    /// Directory output files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Output file name without extension
    #[serde(default = "default_file_stem")]
    pub file_stem: String,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.file_stem.trim().is_empty() {
            return Err("export.file_stem cannot be empty".to_string());
        }

        if self.file_stem.contains(['/', '\\']) {
            return Err(format!(
                "export.file_stem '{}' must not contain path separators",
                self.file_stem
            ));
        }

        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        if matches!(&self.user_name, Some(name) if name.trim().is_empty()) {
            return Err("export.user_name cannot be blank when set".to_string());
        }

        Ok(())
    }

    /// Options handed to the entry compiler
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            update_on_import: self.update_on_import,
            unmapped: self.unmapped_entries,
        }
    }

    /// Identity written into the header
    pub fn user_identity(&self) -> UserIdentity {
        UserIdentity {
            user_id: self.user_id,
            user_name: self.user_name.clone(),
        }
    }

    /// Output path for a batch
    ///
    /// A single-batch export writes `<stem>.xml`; split exports suffix the
    /// stem with the record kind (`<stem>-anime.xml`, `<stem>-manga.xml`).
    pub fn output_path(&self, split: Option<KindGroup>) -> PathBuf {
        let name = match split {
            None => format!("{}.xml", self.file_stem),
            Some(KindGroup::Video) => format!("{}-anime.xml", self.file_stem),
            Some(KindGroup::Text) => format!("{}-manga.xml", self.file_stem),
        };
        PathBuf::from(&self.output_dir).join(name)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            update_on_import: true,
            unmapped_entries: UnmappedPolicy::Keep,
            user_id: None,
            user_name: None,
            output_dir: default_output_dir(),
            file_stem: default_file_stem(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_file_stem() -> String {
    "malxml".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig {
            log_level: "info".to_string(),
            dry_run: false,
        };

        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_config_validation() {
        let mut config = ExportConfig::default();
        assert!(config.validate().is_ok());

        config.file_stem = "".to_string();
        assert!(config.validate().is_err());

        config.file_stem = "out/list".to_string();
        assert!(config.validate().is_err());

        config.file_stem = "list".to_string();
        config.user_name = Some("  ".to_string());
        assert!(config.validate().is_err());

        config.user_name = Some("someone".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_export_output_paths() {
        let config = ExportConfig {
            output_dir: "out".to_string(),
            file_stem: "list".to_string(),
            ..ExportConfig::default()
        };

        assert_eq!(config.output_path(None), Path::new("out/list.xml"));
        assert_eq!(
            config.output_path(Some(KindGroup::Video)),
            Path::new("out/list-anime.xml")
        );
        assert_eq!(
            config.output_path(Some(KindGroup::Text)),
            Path::new("out/list-manga.xml")
        );
    }

    #[test]
    fn test_export_compile_options() {
        let config = ExportConfig {
            update_on_import: false,
            unmapped_entries: UnmappedPolicy::Comment,
            user_id: Some(9),
            ..ExportConfig::default()
        };

        let options = config.compile_options();
        assert!(!options.update_on_import);
        assert_eq!(options.unmapped, UnmappedPolicy::Comment);
        assert_eq!(config.user_identity().user_id, Some(9));
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.local_enabled);
        assert_eq!(config.local_path, "logs");
        assert_eq!(config.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_rotation_validation() {
        let mut config = LoggingConfig::default();
        for rotation in ["daily", "hourly", "never"] {
            config.local_rotation = rotation.to_string();
            assert!(config.validate().is_ok());
        }
        config.local_rotation = "size".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: MalxportConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert!(config.export.update_on_import);
        assert_eq!(config.export.unmapped_entries, UnmappedPolicy::Keep);
        assert_eq!(config.export.file_stem, "malxml");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_output_dir(), ".");
        assert_eq!(default_file_stem(), "malxml");
        assert_eq!(default_local_rotation(), "daily");
    }
}
