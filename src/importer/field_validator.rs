// ==========================================
// Product Import - field validator
// ==========================================
// Stateless pre-transform checks; every rule runs, errors accumulate
// Optional fields (stock/price) are only checked when present
// ==========================================

use crate::config::ColumnMapping;
use crate::domain::product::RawRecord;
use crate::importer::price_normalizer::PriceNormalizer;

// ==========================================
// ValidationOutcome
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub errors: Vec<String>, // in rule order
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct FieldValidator {
    columns: ColumnMapping,
    price_normalizer: PriceNormalizer,
}

impl FieldValidator {
    pub fn new(columns: ColumnMapping) -> Self {
        Self {
            columns,
            price_normalizer: PriceNormalizer,
        }
    }

    pub fn validate(&self, record: &RawRecord) -> ValidationOutcome {
        let mut errors = Vec::new();

        // Required text fields
        for column in [
            &self.columns.code,
            &self.columns.name,
            &self.columns.description,
        ] {
            if record.non_empty(column).is_none() {
                errors.push(format!("{} is required", column));
            }
        }

        // Stock: non-negative integer
        if let Some(stock) = record.non_empty(&self.columns.stock) {
            if !matches!(stock.parse::<i64>(), Ok(v) if v >= 0) {
                errors.push(format!("{} must be a non-negative integer", self.columns.stock));
            }
        }

        // Price: normalizable and non-negative
        if let Some(price) = record.non_empty(&self.columns.price) {
            if !matches!(self.price_normalizer.parse(price), Some(v) if v >= 0.0) {
                errors.push(format!(
                    "{} must be a valid positive number",
                    self.columns.price
                ));
            }
        }

        ValidationOutcome { errors }
    }
}
