// ==========================================
// Product Import - import layer
// ==========================================
// Source rows -> validated, deduplicated, rule-checked products
// Formats: CSV, Excel
// ==========================================

pub mod deduplicator;
pub mod discontinued_resolver;
pub mod error;
pub mod field_validator;
pub mod file_parser;
pub mod importer_trait;
pub mod price_normalizer;
pub mod product_importer;
pub mod record_transformer;
pub mod rule_engine;

// Core types
pub use deduplicator::Deduplicator;
pub use discontinued_resolver::DiscontinuedResolver;
pub use error::{ImportError, ImportResult};
pub use field_validator::{FieldValidator, ValidationOutcome};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use price_normalizer::PriceNormalizer;
pub use product_importer::{ProductImporter, DB_INSERT_FAILED, DB_LOOKUP_FAILED};
pub use record_transformer::RecordTransformer;
pub use rule_engine::{HighValueRule, LowValueLowStockRule, RuleEngine};

// Traits
pub use importer_trait::{FileParser, ImportRule, RecordStream, RuleSubject};
