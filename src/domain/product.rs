// ==========================================
// Product Import - product domain model
// ==========================================
// RawRecord: one source row, header-keyed
// ProductRecord: canonical entity handed to the store
// ImportBatch: one run's summary row
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Max lengths enforced by the `product_data` table.
pub const PRODUCT_CODE_MAX_LEN: usize = 10;
pub const PRODUCT_NAME_MAX_LEN: usize = 50;
pub const PRODUCT_DESC_MAX_LEN: usize = 255;

/// Price stored when the source leaves it blank.
pub const DEFAULT_PRICE: &str = "0.00";

// ==========================================
// RawRecord - one source row
// ==========================================
// Immutable once read; keys are exactly the header's key set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub line_number: usize,              // 1-based, data rows after the header
    pub fields: HashMap<String, String>, // header -> trimmed value
}

impl RawRecord {
    pub fn new(line_number: usize, fields: HashMap<String, String>) -> Self {
        Self {
            line_number,
            fields,
        }
    }

    /// Trimmed value of a column, `""` when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(|v| v.trim()).unwrap_or("")
    }

    /// Trimmed value of a column, `None` when absent or blank.
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        let value = self.get(column);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

// ==========================================
// ProductRecord - canonical product
// ==========================================
// Invariant: `price` is a valid non-negative decimal string
// `code` is the only identity used for duplicate detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub code: String,                            // product code (unique key)
    pub name: String,                            // display name
    pub description: String,                     // free-text description
    pub stock: i64,                              // units on hand, default 0
    pub price: String,                           // normalized decimal, default "0.00"
    pub added_at: DateTime<Utc>,                 // transform instant
    pub discontinued_at: Option<DateTime<Utc>>,  // set when flagged discontinued
}

impl ProductRecord {
    pub fn is_discontinued(&self) -> bool {
        self.discontinued_at.is_some()
    }

    /// Name shown in the success list.
    pub fn display_name(&self) -> String {
        if self.is_discontinued() {
            format!("{} (Discontinued)", self.name)
        } else {
            self.name.clone()
        }
    }
}

// ==========================================
// ImportBatch - one run's summary row
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportBatch {
    pub batch_id: String,              // run id (UUID)
    pub source: String,                // source path as given
    pub total_rows: usize,
    pub success_rows: usize,
    pub skipped_rows: usize,
    pub failed_rows: usize,
    pub elapsed_ms: u64,
    pub imported_at: DateTime<Utc>,
}
