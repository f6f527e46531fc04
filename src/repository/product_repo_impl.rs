// ==========================================
// Product Import - product repository (rusqlite)
// ==========================================

use crate::db::{init_schema, open_in_memory, open_sqlite_connection};
use crate::domain::product::{ImportBatch, ProductRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::product_repo::ProductRepository;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// ProductRepositoryImpl
// ==========================================
pub struct ProductRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl ProductRepositoryImpl {
    /// Open (and initialise if needed) the database at `db_path`.
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Throwaway in-memory store.
    pub fn in_memory() -> RepositoryResult<Self> {
        let conn =
            open_in_memory().map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Handle for collaborators that share this database (ConfigManager).
    pub fn shared_connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

fn parse_timestamp(raw: Option<String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

impl ProductRepository for ProductRepositoryImpl {
    fn exists_product_code(&self, code: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM product_data WHERE product_code = ?1 LIMIT 1",
                params![code],
                |_row| Ok(true),
            )
            .optional()?;
        Ok(found.unwrap_or(false))
    }

    fn save_product(&self, product: ProductRecord) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO product_data (
                product_name, product_desc, product_code,
                added_at, discontinued_at, updated_at, stock, price
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                product.name,
                product.description,
                product.code,
                product.added_at.to_rfc3339(),
                product.discontinued_at.map(|dt| dt.to_rfc3339()),
                Utc::now().to_rfc3339(),
                product.stock,
                product.price,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn find_by_code(&self, code: &str) -> RepositoryResult<Option<ProductRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT product_code, product_name, product_desc, stock, price,
                   added_at, discontinued_at
            FROM product_data
            WHERE product_code = ?1
            "#,
        )?;

        let product = stmt
            .query_row(params![code], |row| {
                Ok(ProductRecord {
                    code: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    stock: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
                    price: row
                        .get::<_, Option<String>>(4)?
                        .unwrap_or_else(|| crate::domain::DEFAULT_PRICE.to_string()),
                    added_at: parse_timestamp(row.get(5)?).unwrap_or_else(Utc::now),
                    discontinued_at: parse_timestamp(row.get(6)?),
                })
            })
            .optional()?;
        Ok(product)
    }

    fn count_products(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM product_data", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn insert_batch(&self, batch: &ImportBatch) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO import_batch (
                batch_id, source, total_rows, success_rows, skipped_rows,
                failed_rows, elapsed_ms, imported_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                batch.batch_id,
                batch.source,
                batch.total_rows as i64,
                batch.success_rows as i64,
                batch.skipped_rows as i64,
                batch.failed_rows as i64,
                batch.elapsed_ms as i64,
                batch.imported_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }
}
