// ==========================================
// Product Import - config manager
// ==========================================
// Storage: config_kv table (scope_id = 'global')
// Missing keys fall back to ColumnMapping::default()
// ==========================================

use crate::config::error::ConfigError;
use crate::config::import_config_trait::{ColumnMapping, ImportConfigReader};
use crate::db::configure_sqlite_connection;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

/// config_kv keys
pub mod config_keys {
    pub const COLUMN_CODE: &str = "import/column/code";
    pub const COLUMN_NAME: &str = "import/column/name";
    pub const COLUMN_DESCRIPTION: &str = "import/column/description";
    pub const COLUMN_STOCK: &str = "import/column/stock";
    pub const COLUMN_PRICE: &str = "import/column/price";
    pub const COLUMN_DISCONTINUED: &str = "import/column/discontinued";
}

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
    defaults: ColumnMapping,
}

impl ConfigManager {
    /// Build on a shared connection; reapplies the shared PRAGMAs (idempotent).
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, ConfigError> {
        {
            let guard = conn
                .lock()
                .map_err(|e| ConfigError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard).map_err(|e| ConfigError::ReadError {
                key: "*".to_string(),
                message: e.to_string(),
            })?;
        }

        Ok(Self {
            conn,
            defaults: ColumnMapping::default(),
        })
    }

    /// Raw value for a key, `None` when unset.
    pub fn get_config_value(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;

        conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|e| ConfigError::ReadError {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Upsert a global key.
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )
        .map_err(|e| ConfigError::ReadError {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Header value for `key`; blank overrides are rejected.
    fn get_column(&self, key: &str, default: &str) -> Result<String, ConfigError> {
        match self.get_config_value(key)? {
            None => Ok(default.to_string()),
            Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value,
                message: "column header must not be blank".to_string(),
            }),
            Some(value) => Ok(value.trim().to_string()),
        }
    }
}

impl ImportConfigReader for ConfigManager {
    fn code_column(&self) -> Result<String, ConfigError> {
        self.get_column(config_keys::COLUMN_CODE, &self.defaults.code)
    }

    fn name_column(&self) -> Result<String, ConfigError> {
        self.get_column(config_keys::COLUMN_NAME, &self.defaults.name)
    }

    fn description_column(&self) -> Result<String, ConfigError> {
        self.get_column(config_keys::COLUMN_DESCRIPTION, &self.defaults.description)
    }

    fn stock_column(&self) -> Result<String, ConfigError> {
        self.get_column(config_keys::COLUMN_STOCK, &self.defaults.stock)
    }

    fn price_column(&self) -> Result<String, ConfigError> {
        self.get_column(config_keys::COLUMN_PRICE, &self.defaults.price)
    }

    fn discontinued_column(&self) -> Result<String, ConfigError> {
        self.get_column(config_keys::COLUMN_DISCONTINUED, &self.defaults.discontinued)
    }
}
