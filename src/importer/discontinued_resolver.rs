// ==========================================
// Product Import - discontinued flag
// ==========================================

use chrono::{DateTime, Utc};

const DISCONTINUED_TOKEN: &str = "yes";

#[derive(Debug, Clone, Copy, Default)]
pub struct DiscontinuedResolver;

impl DiscontinuedResolver {
    /// `Some(now)` when the trimmed flag is "yes" in any case.
    pub fn resolve(&self, raw_flag: &str) -> Option<DateTime<Utc>> {
        self.resolve_at(raw_flag, Utc::now())
    }

    pub fn resolve_at(&self, raw_flag: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        raw_flag
            .trim()
            .eq_ignore_ascii_case(DISCONTINUED_TOKEN)
            .then_some(now)
    }
}
