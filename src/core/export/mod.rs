//! Export orchestration
//!
//! This module provides the batch-level export logic:
//! - Kind-group locking and batch validation
//! - Aggregate header computation
//! - Document assembly and summary reporting

pub mod exporter;
pub mod header;
pub mod summary;

pub use exporter::{lock_group, BatchExporter, CompiledBatch};
pub use header::{AggregateHeader, StatusCounts, UserIdentity};
pub use summary::ExportSummary;
