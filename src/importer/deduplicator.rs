// ==========================================
// Product Import - duplicate detection
// ==========================================
// Order: in-run seen set, then the store (skipped in dry run)
// A code is marked seen once it passes the in-run check, before
// the store lookup, so any later repeat is a "CSV" duplicate
// ==========================================

use crate::domain::types::DuplicateStatus;
use crate::repository::{ProductRepository, RepositoryResult};
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `code` and mark it seen.
    ///
    /// # Parameters
    /// - store: `None` disables the persisted check (dry run)
    ///
    /// # Returns
    /// - Err only when the store lookup fails; the code stays marked
    pub fn check_and_mark(
        &mut self,
        code: &str,
        store: Option<&dyn ProductRepository>,
    ) -> RepositoryResult<DuplicateStatus> {
        if !self.seen.insert(code.to_string()) {
            return Ok(DuplicateStatus::AlreadySeenInBatch);
        }

        if let Some(repo) = store {
            if repo.exists_product_code(code)? {
                return Ok(DuplicateStatus::AlreadyPersisted);
            }
        }
        Ok(DuplicateStatus::New)
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
