//! External inputs for malxport.
//!
//! This module provides adapters that produce canonical entries for the core:
//!
//! - [`savefile`] - Canonical save files (JSON or YAML)
//!
//! # Example
//!
//! ```rust,no_run
//! use malxport::adapters::savefile::SaveFile;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let save = SaveFile::load("list.json").await?;
//! let grouped = save.split_by_group();
//! println!("{} anime, {} manga", grouped.video.len(), grouped.text.len());
//! # Ok(())
//! # }
//! ```

pub mod savefile;

pub use savefile::{GroupedEntries, SaveFile, SaveFileFormat};
