// ==========================================
// Product Import - import orchestrator
// ==========================================
// Per record, strictly in source order:
// Validating -> Deduplicating -> Transforming -> RuleChecking -> Persisting
// The first disqualifying condition is terminal for that record
// Only a source that cannot be opened aborts the run
// ==========================================

use crate::config::{ColumnMapping, ImportConfigReader};
use crate::domain::product::{ImportBatch, RawRecord};
use crate::domain::report::ImportReport;
use crate::domain::types::{DuplicateStatus, RecordOutcome, RecordStage};
use crate::importer::deduplicator::Deduplicator;
use crate::importer::error::ImportResult;
use crate::importer::field_validator::FieldValidator;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{FileParser, ImportRule, RuleSubject};
use crate::importer::record_transformer::RecordTransformer;
use crate::importer::rule_engine::RuleEngine;
use crate::repository::ProductRepository;
use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

pub const DB_INSERT_FAILED: &str = "Database insertion failed";
pub const DB_LOOKUP_FAILED: &str = "Database lookup failed";

// ==========================================
// ProductImporter
// ==========================================
pub struct ProductImporter<R>
where
    R: ProductRepository,
{
    // data access
    repo: R,

    // import components
    file_parser: Box<dyn FileParser>,
    columns: ColumnMapping,
    validator: FieldValidator,
    transformer: RecordTransformer,
    rule_engine: RuleEngine,
}

impl<R> ProductImporter<R>
where
    R: ProductRepository,
{
    /// Importer with the default parser and built-in rules.
    ///
    /// # Parameters
    /// - repo: product store
    /// - config: source header names, resolved once here
    pub fn new<C: ImportConfigReader>(repo: R, config: &C) -> ImportResult<Self> {
        let columns = config.column_mapping()?;
        Ok(Self::with_components(
            repo,
            columns,
            Box::new(UniversalFileParser),
            RuleEngine::with_default_rules(),
        ))
    }

    pub fn with_components(
        repo: R,
        columns: ColumnMapping,
        file_parser: Box<dyn FileParser>,
        rule_engine: RuleEngine,
    ) -> Self {
        Self {
            repo,
            validator: FieldValidator::new(columns.clone()),
            transformer: RecordTransformer::new(columns.clone()),
            columns,
            file_parser,
            rule_engine,
        }
    }

    /// Append a rule after the built-in ones.
    pub fn add_rule(&mut self, rule: Box<dyn ImportRule>) {
        self.rule_engine.add_rule(rule);
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Import one source file.
    ///
    /// # Parameters
    /// - file_path: .csv/.xlsx/.xls, or no extension for CSV
    /// - dry_run: no writes and no persisted-duplicate checks
    ///
    /// # Returns
    /// - Ok(ImportReport): every row classified
    /// - Err: the source could not be opened; nothing was processed
    #[instrument(skip(self, file_path), fields(source = %file_path.as_ref().display()))]
    pub fn import<P: AsRef<Path>>(&self, file_path: P, dry_run: bool) -> ImportResult<ImportReport> {
        let path = file_path.as_ref();
        let records = self.file_parser.open(path).map_err(|e| {
            error!(error = %e, "source open failed");
            e
        })?;
        Ok(self.import_records(records, &path.display().to_string(), dry_run))
    }

    /// Run the pipeline over an already-open row stream.
    #[instrument(skip(self, records), fields(batch_id = tracing::field::Empty))]
    pub fn import_records<I>(&self, records: I, source: &str, dry_run: bool) -> ImportReport
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());
        info!(batch_id = %batch_id, source, dry_run, "import started");

        let mut report = ImportReport::new(batch_id.clone(), source, dry_run);
        let mut dedup = Deduplicator::new();

        for record in records {
            report.increment_total();
            let outcome = self.process_record(&record, &mut dedup, dry_run);
            report.record(outcome);
        }

        report.set_elapsed_ms(start_time.elapsed().as_millis() as u64);

        info!(
            batch_id = %batch_id,
            total = report.total_processed(),
            successful = report.successful(),
            skipped = report.skipped(),
            failed = report.failed(),
            elapsed_ms = report.elapsed_ms(),
            "import finished"
        );

        if !dry_run {
            self.save_batch_summary(&report);
        }

        report
    }

    fn process_record(
        &self,
        record: &RawRecord,
        dedup: &mut Deduplicator,
        dry_run: bool,
    ) -> RecordOutcome {
        let line = record.line_number;

        // === Validating ===
        stage_entered(line, RecordStage::Validating);
        let outcome = self.validator.validate(record);
        if !outcome.is_valid() {
            let code = match record.non_empty(&self.columns.code) {
                Some(code) => code.to_string(),
                None => format!("Line {}", line),
            };
            return failed(line, RecordStage::Validating, code, outcome.errors.join(", "));
        }
        let code = record.get(&self.columns.code).to_string();

        // === Deduplicating ===
        stage_entered(line, RecordStage::Deduplicating);
        let store: Option<&dyn ProductRepository> = if dry_run { None } else { Some(&self.repo) };
        match dedup.check_and_mark(&code, store) {
            Ok(DuplicateStatus::New) => {}
            Ok(status) => {
                let reason = status.skip_reason().unwrap_or_default().to_string();
                return skipped(line, RecordStage::Deduplicating, code, reason);
            }
            Err(e) => {
                error!(line, code = %code, error = %e, "existence check failed");
                return failed(line, RecordStage::Deduplicating, code, DB_LOOKUP_FAILED.to_string());
            }
        }

        // === Transforming ===
        stage_entered(line, RecordStage::Transforming);
        let (product, errors) = self.transformer.transform(record);
        if !errors.is_empty() {
            return failed(line, RecordStage::Transforming, code, errors.join(", "));
        }

        // === RuleChecking ===
        stage_entered(line, RecordStage::RuleChecking);
        let decision = self.rule_engine.evaluate(&RuleSubject::from_product(&product));
        if decision.skip {
            let reason = decision.reason.unwrap_or_default();
            return skipped(line, RecordStage::RuleChecking, code, reason);
        }

        // === Persisting ===
        stage_entered(line, RecordStage::Persisting);
        let detail = product.display_name();
        if !dry_run {
            if let Err(e) = self.repo.save_product(product) {
                error!(line, code = %code, error = %e, "product write failed");
                return failed(line, RecordStage::Persisting, code, DB_INSERT_FAILED.to_string());
            }
        }

        info!(line, code = %code, dry_run, "record imported");
        RecordOutcome::Succeeded { code, detail }
    }

    /// One import_batch row per real run; a failed write only logs.
    fn save_batch_summary(&self, report: &ImportReport) {
        let batch = ImportBatch {
            batch_id: report.batch_id().to_string(),
            source: report.source().to_string(),
            total_rows: report.total_processed(),
            success_rows: report.successful(),
            skipped_rows: report.skipped(),
            failed_rows: report.failed(),
            elapsed_ms: report.elapsed_ms(),
            imported_at: Utc::now(),
        };
        if let Err(e) = self.repo.insert_batch(&batch) {
            warn!(batch_id = %batch.batch_id, error = %e, "batch summary not saved");
        }
    }
}

fn stage_entered(line: usize, stage: RecordStage) {
    info!(line, stage = %stage, "record stage");
}

fn skipped(line: usize, stage: RecordStage, code: String, reason: String) -> RecordOutcome {
    warn!(line, stage = %stage, code = %code, reason = %reason, "record skipped");
    RecordOutcome::Skipped { code, reason }
}

fn failed(line: usize, stage: RecordStage, code: String, reason: String) -> RecordOutcome {
    error!(line, stage = %stage, code = %code, reason = %reason, "record failed");
    RecordOutcome::Failed { code, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::ProductRecord;
    use crate::repository::{ProductRepositoryImpl, RepositoryError, RepositoryResult};
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn row(line: usize, values: [&str; 6]) -> RawRecord {
        let columns = ColumnMapping::default();
        let keys = [
            &columns.code,
            &columns.name,
            &columns.description,
            &columns.stock,
            &columns.price,
            &columns.discontinued,
        ];
        let fields: HashMap<_, _> = keys
            .iter()
            .zip(values)
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RawRecord::new(line, fields)
    }

    fn importer<R: ProductRepository>(repo: R) -> ProductImporter<R> {
        ProductImporter::new(repo, &ColumnMapping::default()).unwrap()
    }

    /// Store that records calls and can be told to fail.
    #[derive(Default)]
    struct ScriptedRepo {
        saved: Mutex<Vec<String>>,
        exists_calls: Mutex<usize>,
        fail_save: bool,
        fail_exists: bool,
    }

    impl ProductRepository for ScriptedRepo {
        fn exists_product_code(&self, _code: &str) -> RepositoryResult<bool> {
            *self.exists_calls.lock().unwrap() += 1;
            if self.fail_exists {
                return Err(RepositoryError::DatabaseQueryError("locked".to_string()));
            }
            Ok(false)
        }

        fn save_product(&self, product: ProductRecord) -> RepositoryResult<i64> {
            if self.fail_save {
                return Err(RepositoryError::DatabaseQueryError("disk full".to_string()));
            }
            let mut saved = self.saved.lock().unwrap();
            saved.push(product.code);
            Ok(saved.len() as i64)
        }

        fn find_by_code(&self, _code: &str) -> RepositoryResult<Option<ProductRecord>> {
            Ok(None)
        }

        fn count_products(&self) -> RepositoryResult<usize> {
            Ok(self.saved.lock().unwrap().len())
        }

        fn insert_batch(&self, _batch: &ImportBatch) -> RepositoryResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_reference_scenario() {
        let repo = ProductRepositoryImpl::in_memory().unwrap();
        let importer = importer(repo);

        let report = importer.import_records(
            vec![
                row(1, ["P0001", "TV", "32\" Tv", "10", "399.99", ""]),
                row(2, ["P0002", "Cd Player", "Nice CD player", "11", "50.12", "yes"]),
                row(3, ["P0003", "VCR", "Top notch VCR", "5", "4.50", ""]),
            ],
            "scenario.csv",
            false,
        );

        assert_eq!(report.total_processed(), 3);
        assert_eq!(report.successful(), 2);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.skipped_items()[0].detail, "Cost < $5 and Stock < 10");
        assert_eq!(report.successful_items()[1].detail, "Cd Player (Discontinued)");
        assert!(report.is_consistent());

        let p2 = importer.repository().find_by_code("P0002").unwrap().unwrap();
        assert!(p2.discontinued_at.is_some());
        assert_eq!(importer.repository().count_products().unwrap(), 2);
    }

    #[test]
    fn test_dry_run_never_saves_or_checks_store() {
        let importer = importer(ScriptedRepo::default());
        let report = importer.import_records(
            vec![
                row(1, ["P1", "A", "a", "20", "10", ""]),
                row(2, ["P1", "A", "a", "20", "10", ""]),
            ],
            "dry.csv",
            true,
        );

        assert_eq!(report.successful(), 1);
        assert_eq!(report.skipped_items()[0].detail, "Duplicate product code in CSV");
        assert!(importer.repository().saved.lock().unwrap().is_empty());
        assert_eq!(*importer.repository().exists_calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_write_failure_is_per_record() {
        let importer = importer(ScriptedRepo {
            fail_save: true,
            ..ScriptedRepo::default()
        });
        let report = importer.import_records(
            vec![
                row(1, ["P1", "A", "a", "20", "10", ""]),
                row(2, ["P2", "B", "b", "20", "10", ""]),
            ],
            "fail.csv",
            false,
        );

        assert_eq!(report.failed(), 2);
        assert_eq!(report.failed_items()[0].detail, DB_INSERT_FAILED);
        assert!(report.is_consistent());
    }

    #[test]
    fn test_lookup_failure_is_per_record() {
        let importer = importer(ScriptedRepo {
            fail_exists: true,
            ..ScriptedRepo::default()
        });
        let report =
            importer.import_records(vec![row(1, ["P1", "A", "a", "20", "10", ""])], "x.csv", false);

        assert_eq!(report.failed(), 1);
        assert_eq!(report.failed_items()[0].detail, DB_LOOKUP_FAILED);
        assert!(importer.repository().saved.lock().unwrap().is_empty());
    }

    #[test]
    fn test_validation_failure_uses_line_fallback_and_joins_errors() {
        let importer = importer(ScriptedRepo::default());
        let report =
            importer.import_records(vec![row(7, ["", "", "desc", "x", "", ""])], "x.csv", false);

        assert_eq!(report.failed_items()[0].code, "Line 7");
        assert_eq!(
            report.failed_items()[0].detail,
            "Product Code is required, Product Name is required, Stock must be a non-negative integer"
        );
        assert_eq!(*importer.repository().exists_calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_failed_validation_does_not_mark_code_seen() {
        let importer = importer(ScriptedRepo::default());
        let report = importer.import_records(
            vec![
                row(1, ["P1", "", "a", "20", "10", ""]),
                row(2, ["P1", "A", "a", "20", "10", ""]),
            ],
            "x.csv",
            true,
        );

        assert_eq!(report.failed(), 1);
        assert_eq!(report.successful(), 1);
        assert_eq!(report.successful_items()[0].code, "P1");
    }

    struct RejectEverything;

    impl ImportRule for RejectEverything {
        fn name(&self) -> &str {
            "reject_everything"
        }

        fn evaluate(&self, _subject: &RuleSubject) -> crate::domain::types::RuleDecision {
            crate::domain::types::RuleDecision::skip("Embargoed")
        }
    }

    #[test]
    fn test_added_rule_runs_after_builtins() {
        let mut importer = importer(ScriptedRepo::default());
        importer.add_rule(Box::new(RejectEverything));

        let report = importer.import_records(
            vec![
                row(1, ["P1", "A", "a", "1", "1.00", ""]),
                row(2, ["P2", "B", "b", "50", "20.00", ""]),
            ],
            "x.csv",
            true,
        );

        assert_eq!(report.skipped_items()[0].detail, "Cost < $5 and Stock < 10");
        assert_eq!(report.skipped_items()[1].detail, "Embargoed");
        assert_eq!(report.successful(), 0);
    }

    #[test]
    fn test_batch_summary_written_after_real_run() {
        let repo = ProductRepositoryImpl::in_memory().unwrap();
        let importer = importer(repo);
        let report =
            importer.import_records(vec![row(1, ["P1", "A", "a", "20", "10", ""])], "x.csv", false);

        let shared = importer.repository().shared_connection();
        let conn = shared.lock().unwrap();
        let stored: i64 = conn
            .query_row(
                "SELECT success_rows FROM import_batch WHERE batch_id = ?1",
                [report.batch_id()],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(stored, 1);
    }
}
