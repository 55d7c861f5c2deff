//! Configuration management for malxport.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! malxport uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `MALXPORT_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use malxport::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("malxport.toml")?;
//!
//! println!("Output: {}", config.export.output_path(None).display());
//! println!("Unmapped entries: {:?}", config.export.unmapped_entries);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level, dry run)
//! - [`ExportConfig`] - Export settings (import flags, user identity, output naming)
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! update_on_import = true
//! unmapped_entries = "keep"
//! user_name = "${MAL_USERNAME}"
//! output_dir = "exports"
//! file_stem = "malxml"
//!
//! [logging]
//! local_enabled = false
//! local_path = "logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str};
pub use schema::{ApplicationConfig, ExportConfig, LoggingConfig, MalxportConfig};
