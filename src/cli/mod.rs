//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for malxport using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// malxport - canonical media lists to MyAnimeList XML
#[derive(Parser, Debug)]
#[command(name = "malxport")]
#[command(version, about, long_about = None)]
#[command(author = "malxport Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "malxport.toml", env = "MALXPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MALXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a save file into MAL XML
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
