// ==========================================
// Product Import - product repository trait
// ==========================================
// Data access only; no business rules here
// `code` is the uniqueness key
// ==========================================

use crate::domain::product::{ImportBatch, ProductRecord};
use crate::repository::error::RepositoryResult;

// ==========================================
// ProductRepository Trait
// ==========================================
// Implementor: ProductRepositoryImpl (rusqlite)
pub trait ProductRepository: Send + Sync {
    /// Whether a product with this code is already stored.
    fn exists_product_code(&self, code: &str) -> RepositoryResult<bool>;

    /// Insert one product.
    ///
    /// # Returns
    /// - Ok(i64): new row id
    /// - Err: constraint or database error, nothing written
    fn save_product(&self, product: ProductRecord) -> RepositoryResult<i64>;

    /// Look up a stored product by code.
    fn find_by_code(&self, code: &str) -> RepositoryResult<Option<ProductRecord>>;

    /// Number of stored products.
    fn count_products(&self) -> RepositoryResult<usize>;

    /// Record one import run's summary.
    fn insert_batch(&self, batch: &ImportBatch) -> RepositoryResult<()>;
}
