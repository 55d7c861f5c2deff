//! Markup serialization errors

use thiserror::Error;

/// Failure while writing a markup tree
///
/// Writing into memory does not fail in practice; the variants exist so the
/// writer's errors propagate instead of being swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    /// The XML writer rejected an event
    #[error("XML write failed: {0}")]
    Write(String),

    /// The serialized bytes were not valid UTF-8
    #[error("Serialized markup is not UTF-8: {0}")]
    Encoding(String),
}

impl From<quick_xml::Error> for MarkupError {
    fn from(err: quick_xml::Error) -> Self {
        MarkupError::Write(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for MarkupError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        MarkupError::Encoding(err.to_string())
    }
}
