// ==========================================
// Product Import - import config reader trait
// ==========================================
// Read-only view of the settings the pipeline needs
// ==========================================

use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};

// ==========================================
// ColumnMapping - source header names
// ==========================================
// Validation messages are built from these names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub code: String,
    pub name: String,
    pub description: String,
    pub stock: String,
    pub price: String,
    pub discontinued: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            code: "Product Code".to_string(),
            name: "Product Name".to_string(),
            description: "Product Description".to_string(),
            stock: "Stock".to_string(),
            price: "Cost in GBP".to_string(),
            discontinued: "Discontinued".to_string(),
        }
    }
}

// ==========================================
// ImportConfigReader Trait
// ==========================================
// Implementors: ConfigManager (config_kv table), ColumnMapping (static)
pub trait ImportConfigReader: Send + Sync {
    /// Header of the product code column.
    ///
    /// # Default
    /// - "Product Code"
    fn code_column(&self) -> Result<String, ConfigError>;

    /// # Default
    /// - "Product Name"
    fn name_column(&self) -> Result<String, ConfigError>;

    /// # Default
    /// - "Product Description"
    fn description_column(&self) -> Result<String, ConfigError>;

    /// # Default
    /// - "Stock"
    fn stock_column(&self) -> Result<String, ConfigError>;

    /// # Default
    /// - "Cost in GBP"
    fn price_column(&self) -> Result<String, ConfigError>;

    /// # Default
    /// - "Discontinued"
    fn discontinued_column(&self) -> Result<String, ConfigError>;

    /// All headers at once; the importer resolves this once per construction.
    fn column_mapping(&self) -> Result<ColumnMapping, ConfigError> {
        Ok(ColumnMapping {
            code: self.code_column()?,
            name: self.name_column()?,
            description: self.description_column()?,
            stock: self.stock_column()?,
            price: self.price_column()?,
            discontinued: self.discontinued_column()?,
        })
    }
}

impl ImportConfigReader for ColumnMapping {
    fn code_column(&self) -> Result<String, ConfigError> {
        Ok(self.code.clone())
    }

    fn name_column(&self) -> Result<String, ConfigError> {
        Ok(self.name.clone())
    }

    fn description_column(&self) -> Result<String, ConfigError> {
        Ok(self.description.clone())
    }

    fn stock_column(&self) -> Result<String, ConfigError> {
        Ok(self.stock.clone())
    }

    fn price_column(&self) -> Result<String, ConfigError> {
        Ok(self.price.clone())
    }

    fn discontinued_column(&self) -> Result<String, ConfigError> {
        Ok(self.discontinued.clone())
    }
}
