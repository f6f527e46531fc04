// ==========================================
// Product Import - domain layer
// ==========================================
// Entities and value types only; no data access, no pipeline logic
// ==========================================

pub mod product;
pub mod report;
pub mod types;

pub use product::{
    ImportBatch, ProductRecord, RawRecord, DEFAULT_PRICE, PRODUCT_CODE_MAX_LEN,
    PRODUCT_DESC_MAX_LEN, PRODUCT_NAME_MAX_LEN,
};
pub use report::{ImportReport, ReportEntry};
pub use types::{DuplicateStatus, RecordOutcome, RecordStage, RuleDecision};
