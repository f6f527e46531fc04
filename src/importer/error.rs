// ==========================================
// Product Import - importer errors
// ==========================================
// Only run-fatal conditions live here; per-record problems
// are report entries, never errors
// ==========================================

use crate::config::ConfigError;
use crate::repository::RepositoryError;
use std::io;
use thiserror::Error;

/// Run-fatal import error
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== source =====
    #[error("source file not found: {0}")]
    FileNotFound(String),

    #[error("source file is not readable: {0}")]
    PermissionDenied(String),

    #[error("unsupported source format: {0} (expected .csv/.xlsx/.xls)")]
    UnsupportedFormat(String),

    #[error("source read failed: {0}")]
    FileReadError(String),

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    #[error("Excel parse failed: {0}")]
    ExcelParseError(String),

    // ===== collaborators =====
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ImportError {
    /// Classify an open() failure for `path`.
    pub fn from_open_error(path: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ImportError::FileNotFound(path.to_string()),
            io::ErrorKind::PermissionDenied => ImportError::PermissionDenied(path.to_string()),
            _ => ImportError::FileReadError(format!("{}: {}", path, err)),
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result alias
pub type ImportResult<T> = Result<T, ImportError>;
