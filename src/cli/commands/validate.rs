//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the malxport configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Update On Import: {}", config.export.update_on_import);
        println!("  Unmapped Entries: {:?}", config.export.unmapped_entries);
        println!(
            "  User: {} ({})",
            config.export.user_name.as_deref().unwrap_or("from save file"),
            config
                .export
                .user_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "no id".to_string())
        );
        println!("  Output: {}", config.export.output_path(None).display());
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}
