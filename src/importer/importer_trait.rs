// ==========================================
// Product Import - importer component traits
// ==========================================
// Interfaces only; implementations live beside them
// ==========================================

use crate::domain::product::RawRecord;
use crate::domain::types::RuleDecision;
use crate::importer::error::ImportResult;
use std::path::Path;

/// Ordered, lazy, single-pass stream of source rows.
pub type RecordStream = Box<dyn Iterator<Item = RawRecord> + Send>;

// ==========================================
// FileParser Trait
// ==========================================
// Implementors: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// Open a tabular source.
    ///
    /// # Returns
    /// - Ok(RecordStream): data rows in source order, header consumed
    /// - Err(FileNotFound | PermissionDenied): the only fatal outcomes for a
    ///   readable format; malformed rows degrade instead of failing
    fn open(&self, file_path: &Path) -> ImportResult<RecordStream>;
}

// ==========================================
// RuleSubject - what a rule sees
// ==========================================
// Derived from a transformed ProductRecord; `None` means the value
// could not be read, which rules treat as "do not skip"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleSubject {
    pub price: Option<f64>,
    pub stock: Option<i64>,
}

// ==========================================
// ImportRule Trait
// ==========================================
// Implementors: LowValueLowStockRule, HighValueRule, caller-supplied rules
pub trait ImportRule: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Whether the record should be skipped, and why.
    fn evaluate(&self, subject: &RuleSubject) -> RuleDecision;
}
