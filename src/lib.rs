// malxport - canonical media lists to MyAnimeList XML
// Copyright (c) 2025 malxport Contributors
// Licensed under the MIT License

//! # malxport - canonical media lists to MyAnimeList XML
//!
//! malxport compiles a service-neutral media list (anime, manga and books
//! with statuses, scores, progress, dates and tags) into the XML export format
//! that MyAnimeList and compatible importers accept.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Reading** canonical save files from JSON or YAML
//! - **Mapping** canonical statuses, priorities and storage media onto the legacy vocabularies
//! - **Compiling** homogeneous batches into one `myanimelist` document with an aggregate header
//! - **Summarizing** each export with per-status counts and a content checksum
//!
//! ## Architecture
//!
//! malxport follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (mapping, record compilation, batch export)
//! - [`markup`] - Minimal XML tree and serializer
//! - [`adapters`] - Save file reader
//! - [`domain`] - Canonical entry model and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use malxport::adapters::SaveFile;
//! use malxport::core::export::BatchExporter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let save = SaveFile::load("list.json").await?;
//!
//!     let batch = BatchExporter::default()
//!         .with_user(save.user_identity())
//!         .export(&save.data)?;
//!
//!     std::fs::write("malxml.xml", &batch.document)?;
//!     println!("Exported {} records", batch.summary.records);
//!     Ok(())
//! }
//! ```
//!
//! ## Batches
//!
//! A batch is locked to the kind-group of its first entry. Animation entries
//! compile to `<anime>` records; comics and books compile to `<manga>`
//! records. Mixing the two rejects the whole batch, so split a mixed list
//! first:
//!
//! ```rust
//! use malxport::adapters::SaveFile;
//! use malxport::core::export::BatchExporter;
//! use malxport::domain::KindGroup;
//!
//! # fn example(save: &SaveFile) -> Result<(), Box<dyn std::error::Error>> {
//! let grouped = save.split_by_group();
//! let exporter = BatchExporter::default();
//!
//! for group in [KindGroup::Video, KindGroup::Text] {
//!     let entries = grouped.group(group);
//!     if !entries.is_empty() {
//!         let xml = exporter.compile(entries)?;
//!         println!("{group}: {} bytes", xml.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Compilation fails fast with a [`domain::CompileError`]; the application
//! layer folds it into [`domain::MalxportError`] together with configuration
//! and I/O failures.
//!
//! ## Logging
//!
//! malxport uses structured logging with the `tracing` crate. The library only
//! emits events; installing a subscriber is up to the caller (the binary uses
//! [`logging::init_logging`]).

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod markup;
