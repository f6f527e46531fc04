// ==========================================
// Product Import - configuration layer
// ==========================================
// Storage: config_kv table, defaults in code
// ==========================================

pub mod config_manager;
pub mod error;
pub mod import_config_trait;

pub use config_manager::{config_keys, ConfigManager};
pub use error::ConfigError;
pub use import_config_trait::{ColumnMapping, ImportConfigReader};
