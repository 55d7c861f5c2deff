//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output on stderr
//! - JSON-formatted local log files with rotation
//! - Configurable log levels, overridable with `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use malxport::logging::init_logging;
//! use malxport::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a rejected batch
///
/// # Example
///
/// ```no_run
/// use malxport::log_batch_rejected;
/// use malxport::domain::CompileError;
///
/// let error = CompileError::EmptyBatch;
/// log_batch_rejected!(0, &error);
/// ```
#[macro_export]
macro_rules! log_batch_rejected {
    ($entries:expr, $error:expr) => {
        tracing::warn!(
            entries = $entries,
            error = %$error,
            "Batch rejected"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use malxport::log_error_with_context;
/// use malxport::domain::MalxportError;
///
/// let error = MalxportError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
