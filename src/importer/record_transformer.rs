// ==========================================
// Product Import - record transformer
// ==========================================
// RawRecord -> ProductRecord
// Always returns a record; a non-empty error list means the caller
// must discard it
// ==========================================

use crate::config::ColumnMapping;
use crate::domain::product::{ProductRecord, RawRecord, DEFAULT_PRICE};
use crate::importer::discontinued_resolver::DiscontinuedResolver;
use crate::importer::price_normalizer::PriceNormalizer;
use chrono::{DateTime, Utc};

pub struct RecordTransformer {
    columns: ColumnMapping,
    price_normalizer: PriceNormalizer,
    discontinued_resolver: DiscontinuedResolver,
}

impl RecordTransformer {
    pub fn new(columns: ColumnMapping) -> Self {
        Self {
            columns,
            price_normalizer: PriceNormalizer,
            discontinued_resolver: DiscontinuedResolver,
        }
    }

    pub fn transform(&self, record: &RawRecord) -> (ProductRecord, Vec<String>) {
        self.transform_at(record, Utc::now())
    }

    /// Transform with an explicit instant for `added_at` / `discontinued_at`.
    pub fn transform_at(
        &self,
        record: &RawRecord,
        now: DateTime<Utc>,
    ) -> (ProductRecord, Vec<String>) {
        let mut errors = Vec::new();

        let stock = match record.non_empty(&self.columns.stock) {
            None => 0,
            Some(raw) => raw.parse::<i64>().unwrap_or_else(|_| {
                errors.push(format!("Invalid stock format: {}", raw));
                0
            }),
        };

        let price = match record.non_empty(&self.columns.price) {
            None => DEFAULT_PRICE.to_string(),
            Some(raw) => self.price_normalizer.normalize(raw).unwrap_or_else(|| {
                errors.push(format!("Invalid price format: {}", raw));
                DEFAULT_PRICE.to_string()
            }),
        };

        let product = ProductRecord {
            code: record.get(&self.columns.code).to_string(),
            name: record.get(&self.columns.name).to_string(),
            description: record.get(&self.columns.description).to_string(),
            stock,
            price,
            added_at: now,
            discontinued_at: self
                .discontinued_resolver
                .resolve_at(record.get(&self.columns.discontinued), now),
        };

        (product, errors)
    }
}
