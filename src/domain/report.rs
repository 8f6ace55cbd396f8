//! Import result reporting.
//!
//! An `ImportReport` is produced fresh per operation and never persisted.
//! Batch operations carry per-file breakdowns; single-source operations
//! (library imports) leave the file lists unset.

use serde::{Deserialize, Serialize};

/// Aggregated result of an import operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    /// Whether at least one source succeeded
    pub success: bool,

    /// Human-readable summary of counts
    pub message: String,

    /// Entries appended across all sources
    pub imported_count: usize,

    /// Entries skipped as duplicates across all sources
    pub skipped_count: usize,

    /// Accumulated errors, each prefixed with its source label
    pub errors: Vec<String>,

    /// Labels of sources that validated and merged cleanly (batch only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub successful_files: Option<Vec<String>>,

    /// Labels of sources that failed (batch only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_files: Option<Vec<String>>,
}

impl ImportReport {
    /// Report for a single-source operation (no per-file breakdown)
    pub fn single(imported_count: usize, skipped_count: usize) -> Self {
        Self {
            success: true,
            message: format!(
                "Imported {} entries, skipped {} duplicates",
                imported_count, skipped_count
            ),
            imported_count,
            skipped_count,
            errors: Vec::new(),
            successful_files: None,
            failed_files: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_report() {
        let report = ImportReport::single(3, 1);
        assert!(report.success);
        assert_eq!(report.imported_count, 3);
        assert_eq!(report.skipped_count, 1);
        assert!(report.successful_files.is_none());
        assert!(report.failed_files.is_none());
    }
}
