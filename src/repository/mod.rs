// ==========================================
// Product Import - repository layer
// ==========================================
// Data access behind traits; parameterised queries only
// ==========================================

pub mod error;
pub mod product_repo;
pub mod product_repo_impl;

pub use error::{RepositoryError, RepositoryResult};
pub use product_repo::ProductRepository;
pub use product_repo_impl::ProductRepositoryImpl;
