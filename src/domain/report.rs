// ==========================================
// Product Import - run report
// ==========================================
// Append-only during a run, read-only afterwards
// Invariant: total == successful + skipped + failed once every record is finalized
// ==========================================

use crate::domain::types::RecordOutcome;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

// ==========================================
// ReportEntry - one outcome line
// ==========================================
// detail: display name on success, reason on skip/fail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub code: String,
    pub detail: String,
}

// ==========================================
// ImportReport
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    batch_id: String,
    source: String,
    dry_run: bool,
    elapsed_ms: u64,

    #[serde(rename = "total")]
    total_processed: usize,
    successful: usize,
    skipped: usize,
    failed: usize,

    successful_items: Vec<ReportEntry>,
    skipped_items: Vec<ReportEntry>,
    failed_items: Vec<ReportEntry>,
}

impl ImportReport {
    /// Empty report for one run.
    pub fn new(batch_id: impl Into<String>, source: impl Into<String>, dry_run: bool) -> Self {
        Self {
            batch_id: batch_id.into(),
            source: source.into(),
            dry_run,
            ..Self::default()
        }
    }

    // ===== append / increment =====

    pub fn increment_total(&mut self) {
        self.total_processed += 1;
    }

    pub fn record_success(&mut self, code: impl Into<String>, detail: impl Into<String>) {
        self.successful += 1;
        self.successful_items.push(ReportEntry {
            code: code.into(),
            detail: detail.into(),
        });
    }

    pub fn record_skip(&mut self, code: impl Into<String>, reason: impl Into<String>) {
        self.skipped += 1;
        self.skipped_items.push(ReportEntry {
            code: code.into(),
            detail: reason.into(),
        });
    }

    pub fn record_failure(&mut self, code: impl Into<String>, reason: impl Into<String>) {
        self.failed += 1;
        self.failed_items.push(ReportEntry {
            code: code.into(),
            detail: reason.into(),
        });
    }

    /// Route a terminal outcome to its list.
    pub fn record(&mut self, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Succeeded { code, detail } => self.record_success(code, detail),
            RecordOutcome::Skipped { code, reason } => self.record_skip(code, reason),
            RecordOutcome::Failed { code, reason } => self.record_failure(code, reason),
        }
    }

    pub(crate) fn set_elapsed_ms(&mut self, elapsed_ms: u64) {
        self.elapsed_ms = elapsed_ms;
    }

    // ===== read accessors =====

    pub fn batch_id(&self) -> &str {
        &self.batch_id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn total_processed(&self) -> usize {
        self.total_processed
    }

    pub fn successful(&self) -> usize {
        self.successful
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn successful_items(&self) -> &[ReportEntry] {
        &self.successful_items
    }

    pub fn skipped_items(&self) -> &[ReportEntry] {
        &self.skipped_items
    }

    pub fn failed_items(&self) -> &[ReportEntry] {
        &self.failed_items
    }

    /// total == successful + skipped + failed
    pub fn is_consistent(&self) -> bool {
        self.total_processed == self.successful + self.skipped + self.failed
    }

    /// Plain-text summary for console or log output.
    pub fn format_summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "Import Summary");
        let _ = writeln!(out, "==============");
        let _ = writeln!(out, "Total processed: {}", self.total_processed);
        let _ = writeln!(out, "Successfully imported: {}", self.successful);
        let _ = writeln!(out, "Skipped: {}", self.skipped);
        let _ = writeln!(out, "Failed: {}", self.failed);

        if !self.skipped_items.is_empty() {
            let _ = writeln!(out, "\nSkipped Items:");
            for item in &self.skipped_items {
                let _ = writeln!(out, "- {}: {}", item.code, item.detail);
            }
        }

        if !self.failed_items.is_empty() {
            let _ = writeln!(out, "\nFailed Items:");
            for item in &self.failed_items {
                let _ = writeln!(out, "- {}: {}", item.code, item.detail);
            }
        }

        out
    }
}
