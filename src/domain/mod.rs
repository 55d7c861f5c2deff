//! Domain models and types for malxport.
//!
//! This module contains the canonical list model and the error types shared by
//! the rest of the crate.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Canonical entries** ([`CanonicalEntry`]) and the enumerations they are built from
//! - **Error types** ([`MalxportError`], [`CompileError`])
//! - **Result type aliases** ([`Result`], [`CompileResult`])
//!
//! # Builder Pattern
//!
//! Entries are usually deserialized from save files, but can be built in code:
//!
//! ```rust
//! use malxport::domain::{CanonicalEntry, EntryStatus, KindGroup, MediaKind};
//!
//! let entry = CanonicalEntry::builder()
//!     .kind(MediaKind::Book)
//!     .status(EntryStatus::Planned)
//!     .transliterated_title("Koukaku Kidoutai")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(entry.group(), Some(KindGroup::Text));
//! ```
//!
//! # Error Handling
//!
//! Compile failures convert into [`MalxportError`] with `?`:
//!
//! ```rust
//! use malxport::core::export::BatchExporter;
//! use malxport::domain::Result;
//!
//! fn export_nothing() -> Result<String> {
//!     Ok(BatchExporter::default().compile(&[])?)
//! }
//!
//! assert!(export_nothing().is_err());
//! ```

pub mod entry;
pub mod errors;
pub mod result;

pub use entry::{
    CanonicalEntry, EntryBuilder, EntryDates, EntryStatus, KindGroup, Mappings, MediaIdentifier,
    MediaKind, Priority, Progress, Score, Tags, Title,
};
pub use errors::{CompileError, MalxportError};
pub use result::{CompileResult, Result};
