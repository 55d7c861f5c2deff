//! Core business logic for malxport.
//!
//! This module contains the compiler that turns canonical entries into MAL XML.
//!
//! # Modules
//!
//! - [`mapping`] - Legacy vocabularies and their canonical equivalents
//! - [`record`] - Typed legacy records and their wire layout
//! - [`compile`] - Per-entry compilation
//! - [`export`] - Batch validation, header aggregation and document assembly
//!
//! # Export Workflow
//!
//! 1. **Lock**: Take the kind-group of the first entry
//! 2. **Validate**: Reject the batch if any entry belongs to the other group
//! 3. **Count**: Tally entries per status bucket
//! 4. **Compile**: Turn every entry into a legacy record, in input order
//! 5. **Assemble**: Header first, then records, under one root element
//!
//! # Example
//!
//! ```rust
//! use malxport::core::export::BatchExporter;
//! use malxport::domain::entry::{CanonicalEntry, EntryStatus, MediaKind};
//!
//! let entry = CanonicalEntry::builder()
//!     .kind(MediaKind::Animation)
//!     .status(EntryStatus::Current)
//!     .transliterated_title("Mushishi")
//!     .mapping("myanimelist", 457)
//!     .build()
//!     .unwrap();
//!
//! let xml = BatchExporter::default().compile(&[entry]).unwrap();
//! assert!(xml.contains("<series_animedb_id>457</series_animedb_id>"));
//! ```

pub mod compile;
pub mod export;
pub mod mapping;
pub mod record;
