//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "malxport.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing malxport configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: malxport validate-config");
                println!("  3. Run export: malxport export <save-file>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# malxport configuration file

[application]
log_level = "info"
dry_run = false

[export]
update_on_import = true
unmapped_entries = "keep"
output_dir = "."
file_stem = "malxml"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# malxport configuration file
#
# Values can reference environment variables with ${VAR_NAME}, and every key
# can be overridden with MALXPORT_<SECTION>_<KEY>, for example
# MALXPORT_EXPORT_USER_NAME. A .env file in the working directory is loaded
# automatically.

[application]
# trace | debug | info | warn | error (RUST_LOG takes precedence)
log_level = "info"

# Compile and report without writing any files
dry_run = false

[export]
# Written into every record's update_on_import field. When true, importers
# overwrite entries that are already on your list.
update_on_import = true

# Entries without a MyAnimeList id:
#   keep    - export them with id 0
#   comment - export them as XML comments so importers skip them
unmapped_entries = "keep"

# Header identity. Leave unset to use the save file's user details.
# user_id = 1234567
# user_name = "${MAL_USERNAME}"

# Output location. A single export writes <file_stem>.xml; --split writes
# <file_stem>-anime.xml and <file_stem>-manga.xml.
output_dir = "."
file_stem = "malxml"

[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "logs"

# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MalxportConfig;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "malxport.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "malxport.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config() {
        let config = InitArgs::generate_minimal_config();
        assert!(config.contains("[application]"));
        assert!(config.contains("[export]"));
        assert!(config.contains("[logging]"));
    }

    #[test]
    fn test_generate_config_with_examples() {
        let config = InitArgs::generate_config_with_examples();
        assert!(config.contains("# malxport configuration file"));
        assert!(config.contains("unmapped_entries"));
        assert!(config.contains("MALXPORT_<SECTION>_<KEY>"));
    }

    #[test]
    fn test_generated_configs_parse() {
        for text in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: MalxportConfig = toml::from_str(&text).unwrap();
            assert!(config.validate().is_ok());
        }
    }
}
