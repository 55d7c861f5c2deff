//! Batch export orchestration
//!
//! [`BatchExporter`] compiles a whole batch into one MAL XML document. A batch
//! is compiled atomically: the kind-group is locked from the first entry,
//! every entry is checked against it before anything is compiled, and any
//! error rejects the batch without producing text.

use super::header::{AggregateHeader, StatusCounts, UserIdentity};
use super::summary::ExportSummary;
use crate::core::compile::{CompileOptions, EntryCompiler};
use crate::domain::entry::{CanonicalEntry, KindGroup};
use crate::domain::errors::CompileError;
use crate::domain::result::CompileResult;
use crate::markup::{MarkupDocument, MarkupNode};
use std::time::Instant;

/// Name of the document's root element
pub const ROOT_ELEMENT: &str = "myanimelist";

/// A compiled batch: the document text and its summary
#[derive(Debug, Clone)]
pub struct CompiledBatch {
    /// Serialized document
    pub document: String,
    /// What went into it
    pub summary: ExportSummary,
}

/// Compiles batches of canonical entries into MAL XML documents
///
/// The exporter holds no per-batch state; one instance can compile any number
/// of batches, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct BatchExporter {
    compiler: EntryCompiler,
    user: UserIdentity,
}

impl BatchExporter {
    /// Create a new exporter
    pub fn new(options: CompileOptions) -> Self {
        Self {
            compiler: EntryCompiler::new(options),
            user: UserIdentity::default(),
        }
    }

    /// Sets the user identity written into the header
    pub fn with_user(mut self, user: UserIdentity) -> Self {
        self.user = user;
        self
    }

    /// Compiles a batch and returns the document text
    ///
    /// # Errors
    ///
    /// - [`CompileError::EmptyBatch`] for an empty batch
    /// - [`CompileError::HeterogeneousBatch`] when entries span both kind-groups
    /// - any error raised while compiling an individual entry
    pub fn compile(&self, entries: &[CanonicalEntry]) -> CompileResult<String> {
        self.export(entries).map(|batch| batch.document)
    }

    /// Compiles a batch and returns the document with its summary
    ///
    /// # Errors
    ///
    /// Same as [`BatchExporter::compile`]. Rejections are logged at `warn`.
    pub fn export(&self, entries: &[CanonicalEntry]) -> CompileResult<CompiledBatch> {
        let started = Instant::now();
        let result = self.run(entries, started);

        if let Err(e) = &result {
            crate::log_batch_rejected!(entries.len(), e);
        }

        result
    }

    fn run(&self, entries: &[CanonicalEntry], started: Instant) -> CompileResult<CompiledBatch> {
        let group = lock_group(entries)?;
        tracing::debug!(group = %group, entries = entries.len(), "Compiling batch");

        let counts: StatusCounts = entries.iter().map(|e| &e.status).collect();

        let records = entries
            .iter()
            .map(|entry| self.compiler.compile(entry))
            .collect::<CompileResult<Vec<_>>>()?;
        let unmapped = records.iter().filter(|r| r.database_id() == 0).count();

        let header = AggregateHeader::new(group, entries.len(), counts, self.user.clone());

        let mut root = MarkupNode::new(ROOT_ELEMENT);
        root.add_child(header.to_node());
        for record in &records {
            root.add_child(self.compiler.render(record));
        }

        let mut doc = MarkupDocument::new();
        doc.add_child(root);
        let document = doc.to_text()?;

        let summary = ExportSummary::new(group, records.len(), unmapped, counts, &document)
            .with_duration(started.elapsed());

        Ok(CompiledBatch { document, summary })
    }
}

/// Locks the batch's kind-group from its first entry and checks every other
/// entry against it
///
/// # Errors
///
/// [`CompileError::EmptyBatch`], [`CompileError::UnsupportedKind`] or
/// [`CompileError::HeterogeneousBatch`] with the index of the first mismatch.
pub fn lock_group(entries: &[CanonicalEntry]) -> CompileResult<KindGroup> {
    let first = entries.first().ok_or(CompileError::EmptyBatch)?;
    let expected = group_of(first)?;

    for (index, entry) in entries.iter().enumerate().skip(1) {
        let found = group_of(entry)?;
        if found != expected {
            return Err(CompileError::HeterogeneousBatch {
                index,
                expected,
                found,
            });
        }
    }

    Ok(expected)
}

fn group_of(entry: &CanonicalEntry) -> CompileResult<KindGroup> {
    entry.group().ok_or(CompileError::UnsupportedKind {
        kind: entry.media_kind,
    })
}
