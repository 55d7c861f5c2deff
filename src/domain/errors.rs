//! Domain error types
//!
//! This module defines the error hierarchy for malxport. The compile taxonomy
//! lives in [`CompileError`]; everything the application shell can hit on top
//! of that (configuration, I/O, parsing) is folded into [`MalxportError`].

use super::entry::{KindGroup, MediaKind};
use crate::markup::MarkupError;
use thiserror::Error;

/// Main malxport error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum MalxportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Batch compilation errors
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised while compiling a batch into a legacy document
///
/// Every variant is fail-fast: a batch that produces one of these yields no
/// document at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The batch mixes video-kind and text-kind entries
    #[error("Entry {index} is {found} but the batch was locked to {expected}; split the batch per kind")]
    HeterogeneousBatch {
        /// Position of the first offending entry
        index: usize,
        /// Group locked from the first entry
        expected: KindGroup,
        /// Group of the offending entry
        found: KindGroup,
    },

    /// An enumerated field has no legacy equivalent
    #[error("No legacy value for {field}: '{value}'")]
    ValueMapping {
        /// Name of the field being mapped
        field: &'static str,
        /// The unrecognized source value
        value: String,
    },

    /// A storage medium from the other group's vocabulary was looked up
    #[error("Storage medium '{value}' is not valid for {expected} entries")]
    StorageMediumKindMismatch {
        /// The offending storage medium
        value: String,
        /// Group whose vocabulary was consulted
        expected: KindGroup,
    },

    /// A media kind outside the video/text groups reached the compiler
    #[error("Media kind '{kind}' cannot be exported to MAL XML")]
    UnsupportedKind {
        /// The unsupported kind
        kind: MediaKind,
    },

    /// The batch has no entries to lock a kind from
    #[error("Cannot export an empty batch")]
    EmptyBatch,

    /// The assembled document could not be serialized
    #[error("Failed to serialize document: {0}")]
    Markup(#[from] MarkupError),
}

impl CompileError {
    /// Shorthand for a [`CompileError::ValueMapping`]
    pub fn value_mapping(field: &'static str, value: impl Into<String>) -> Self {
        Self::ValueMapping {
            field,
            value: value.into(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for MalxportError {
    fn from(err: std::io::Error) -> Self {
        MalxportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MalxportError {
    fn from(err: serde_json::Error) -> Self {
        MalxportError::Serialization(err.to_string())
    }
}

// Conversion from serde_yaml::Error
impl From<serde_yaml::Error> for MalxportError {
    fn from(err: serde_yaml::Error) -> Self {
        MalxportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MalxportError {
    fn from(err: toml::de::Error) -> Self {
        MalxportError::Configuration(format!("TOML parse error: {err}"))
    }
}
