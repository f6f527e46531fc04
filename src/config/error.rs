// ==========================================
// Product Import - configuration errors
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config read failed (key: {key}): {message}")]
    ReadError { key: String, message: String },

    #[error("invalid config value (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("config lock failed: {0}")]
    LockError(String),
}
