// ==========================================
// Product Import - business rules
// ==========================================
// Rules run in registration order; the first skip wins and
// later rules are not consulted for that record
// A missing price or stock never matches
// ==========================================

use crate::domain::product::ProductRecord;
use crate::domain::types::RuleDecision;
use crate::importer::importer_trait::{ImportRule, RuleSubject};
use tracing::debug;

impl RuleSubject {
    pub fn from_product(product: &ProductRecord) -> Self {
        Self {
            price: product.price.parse::<f64>().ok(),
            stock: Some(product.stock),
        }
    }
}

// ==========================================
// Built-in rules
// ==========================================

/// price < 5.00 and stock < 10 (both exclusive)
pub struct LowValueLowStockRule {
    pub price_below: f64,
    pub stock_below: i64,
}

impl Default for LowValueLowStockRule {
    fn default() -> Self {
        Self {
            price_below: 5.0,
            stock_below: 10,
        }
    }
}

impl ImportRule for LowValueLowStockRule {
    fn name(&self) -> &str {
        "low_value_low_stock"
    }

    fn evaluate(&self, subject: &RuleSubject) -> RuleDecision {
        match (subject.price, subject.stock) {
            (Some(price), Some(stock)) if price < self.price_below && stock < self.stock_below => {
                RuleDecision::skip("Cost < $5 and Stock < 10")
            }
            _ => RuleDecision::pass(),
        }
    }
}

/// price > 1000.00 (exclusive)
pub struct HighValueRule {
    pub price_above: f64,
}

impl Default for HighValueRule {
    fn default() -> Self {
        Self { price_above: 1000.0 }
    }
}

impl ImportRule for HighValueRule {
    fn name(&self) -> &str {
        "high_value"
    }

    fn evaluate(&self, subject: &RuleSubject) -> RuleDecision {
        match subject.price {
            Some(price) if price > self.price_above => RuleDecision::skip("Cost > $1000"),
            _ => RuleDecision::pass(),
        }
    }
}

// ==========================================
// RuleEngine
// ==========================================
pub struct RuleEngine {
    rules: Vec<Box<dyn ImportRule>>,
}

impl RuleEngine {
    /// Engine with no rules; every record passes.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// LowValueLowStockRule, then HighValueRule.
    pub fn with_default_rules() -> Self {
        let mut engine = Self::empty();
        engine.add_rule(Box::new(LowValueLowStockRule::default()));
        engine.add_rule(Box::new(HighValueRule::default()));
        engine
    }

    /// Append after the existing rules.
    pub fn add_rule(&mut self, rule: Box<dyn ImportRule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn evaluate(&self, subject: &RuleSubject) -> RuleDecision {
        for rule in &self.rules {
            let decision = rule.evaluate(subject);
            if decision.skip {
                debug!(rule = rule.name(), reason = ?decision.reason, "rule matched");
                return decision;
            }
        }
        RuleDecision::pass()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}
