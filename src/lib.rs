// ==========================================
// Product Import - core library
// ==========================================
// Pipeline: read -> validate -> dedup -> transform -> rules -> persist -> report
// Stack: Rust + SQLite
// ==========================================

// ==========================================
// Modules
// ==========================================

// Domain - records, outcomes, report
pub mod domain;

// Data access
pub mod repository;

// Import pipeline
pub mod importer;

// Configuration
pub mod config;

// Database bootstrap (connection PRAGMAs, schema)
pub mod db;

// Logging
pub mod logging;

// Application layer - CLI wiring and rendering
pub mod app;

// ==========================================
// Re-exports
// ==========================================

pub use domain::{
    DuplicateStatus, ImportBatch, ImportReport, ProductRecord, RawRecord, RecordOutcome,
    RecordStage, ReportEntry, RuleDecision,
};

pub use importer::{
    FileParser, ImportError, ImportResult, ImportRule, ProductImporter, RuleEngine, RuleSubject,
};

pub use repository::{ProductRepository, ProductRepositoryImpl, RepositoryError};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Product Import";
