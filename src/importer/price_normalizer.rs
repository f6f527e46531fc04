// ==========================================
// Product Import - price normalizer
// ==========================================
// Strips currency glyphs, thousands separators and whitespace,
// then accepts only `-?digits(.digits)?`
// Shared by FieldValidator and RecordTransformer
// ==========================================

use regex::Regex;
use std::sync::OnceLock;

fn decoration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[£$€,\s]").expect("valid regex"))
}

fn shape_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("valid regex"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PriceNormalizer;

impl PriceNormalizer {
    /// Canonical price string, or `None` when the token is not a number.
    ///
    /// # Returns
    /// - Some(stripped): decimal point and sign preserved, no rounding
    /// - None: anything that is not `-?\d+(\.\d+)?` after stripping
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let stripped = decoration_re().replace_all(raw, "");
        if shape_re().is_match(&stripped) {
            Some(stripped.into_owned())
        } else {
            None
        }
    }

    /// Normalized value as a number; `None` for invalid tokens.
    pub fn parse(&self, raw: &str) -> Option<f64> {
        self.normalize(raw).and_then(|p| p.parse::<f64>().ok())
    }
}
