//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use super::header::StatusCounts;
use crate::domain::entry::KindGroup;
use sha2::{Digest, Sha256};
use std::time::Duration;

/// Summary of one compiled batch
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    /// Kind-group of the batch
    pub group: KindGroup,

    /// Number of entry records in the document
    pub records: usize,

    /// Records without a legacy database id
    pub unmapped: usize,

    /// Per-status counts
    pub counts: StatusCounts,

    /// Hex SHA-256 of the serialized document
    pub checksum: String,

    /// Size of the serialized document in bytes
    pub bytes: usize,

    /// Time spent compiling
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a summary for a serialized document
    pub fn new(
        group: KindGroup,
        records: usize,
        unmapped: usize,
        counts: StatusCounts,
        document: &str,
    ) -> Self {
        Self {
            group,
            records,
            unmapped,
            counts,
            checksum: calculate_checksum(document.as_bytes()),
            bytes: document.len(),
            duration: Duration::ZERO,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Share of records that carry a legacy database id, as a percentage
    pub fn mapped_rate(&self) -> f64 {
        if self.records == 0 {
            return 100.0;
        }
        ((self.records - self.unmapped) as f64 / self.records as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            group = %self.group,
            records = self.records,
            unmapped = self.unmapped,
            current = self.counts.current,
            completed = self.counts.completed_with_repeats(),
            on_hold = self.counts.on_hold,
            dropped = self.counts.dropped,
            planned = self.counts.planned,
            bytes = self.bytes,
            checksum = %self.checksum,
            duration_ms = self.duration.as_millis() as u64,
            mapped_rate = format!("{:.2}%", self.mapped_rate()),
            "Export completed"
        );

        if self.unmapped > 0 {
            tracing::warn!(
                unmapped = self.unmapped,
                "Some entries have no MyAnimeList id and will not match on import"
            );
        }
    }
}

/// Calculate SHA-256 checksum of raw bytes
///
/// Returns a hex-encoded string (64 characters).
pub fn calculate_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{result:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_hex_sha256() {
        let checksum = calculate_checksum(b"");
        assert_eq!(
            checksum,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(calculate_checksum(b"abc").len(), 64);
    }

    #[test]
    fn test_summary_from_document() {
        let summary = ExportSummary::new(
            KindGroup::Video,
            4,
            1,
            StatusCounts::default(),
            "<myanimelist></myanimelist>",
        )
        .with_duration(Duration::from_millis(3));

        assert_eq!(summary.bytes, 27);
        assert_eq!(summary.checksum.len(), 64);
        assert_eq!(summary.duration, Duration::from_millis(3));
        assert!((summary.mapped_rate() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mapped_rate_for_empty_summary() {
        let summary = ExportSummary::new(KindGroup::Text, 0, 0, StatusCounts::default(), "");
        assert_eq!(summary.mapped_rate(), 100.0);
    }
}
