// ==========================================
// Product Import - application state
// ==========================================
// Opens the store once and wires config + importer onto it
// ==========================================

use crate::config::ConfigManager;
use crate::importer::{ImportResult, ProductImporter};
use crate::repository::ProductRepositoryImpl;
use std::path::PathBuf;

/// Overrides the default database location.
pub const DB_PATH_ENV: &str = "PRODUCT_IMPORT_DB_PATH";

const APP_DIR: &str = "product-import";
const DB_FILE: &str = "product_import.db";

pub struct AppState {
    pub db_path: String,
    pub importer: ProductImporter<ProductRepositoryImpl>,
}

impl AppState {
    /// Open (or create) the database and build the importer.
    pub fn new(db_path: String) -> ImportResult<Self> {
        tracing::info!(db_path = %db_path, "opening product store");

        let repo = ProductRepositoryImpl::new(&db_path)?;
        let config = ConfigManager::from_connection(repo.shared_connection())?;
        let importer = ProductImporter::new(repo, &config)?;

        Ok(Self { db_path, importer })
    }
}

/// Database path when `--db` is not given.
///
/// Order: PRODUCT_IMPORT_DB_PATH, then `<data dir>/product-import/product_import.db`,
/// then `./product_import.db`.
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from(format!("./{}", DB_FILE));

    if let Some(data_dir) = dirs::data_dir() {
        let app_dir = data_dir.join(APP_DIR);
        // best-effort: falling back to the working directory is fine
        if std::fs::create_dir_all(&app_dir).is_ok() {
            path = app_dir.join(DB_FILE);
        }
    }

    path.to_string_lossy().to_string()
}
