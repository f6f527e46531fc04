// ==========================================
// Product Import - pipeline value types
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// RuleDecision - one rule's verdict
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDecision {
    pub skip: bool,
    pub reason: Option<String>,
}

impl RuleDecision {
    /// Rule does not apply; later rules are consulted.
    pub fn pass() -> Self {
        Self {
            skip: false,
            reason: None,
        }
    }

    pub fn skip(reason: impl Into<String>) -> Self {
        Self {
            skip: true,
            reason: Some(reason.into()),
        }
    }
}

// ==========================================
// DuplicateStatus - dedup verdict for a code
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DuplicateStatus {
    New,                // first sighting, not in the store
    AlreadySeenInBatch, // earlier row of this run carried the code
    AlreadyPersisted,   // store already holds the code
}

impl DuplicateStatus {
    /// Skip reason recorded in the report, `None` for `New`.
    pub fn skip_reason(&self) -> Option<&'static str> {
        match self {
            DuplicateStatus::New => None,
            DuplicateStatus::AlreadySeenInBatch => Some("Duplicate product code in CSV"),
            DuplicateStatus::AlreadyPersisted => Some("Duplicate product code in database"),
        }
    }
}

// ==========================================
// RecordStage - per-record pipeline state
// ==========================================
// Order: Validating -> Deduplicating -> Transforming -> RuleChecking -> Persisting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStage {
    Validating,
    Deduplicating,
    Transforming,
    RuleChecking,
    Persisting,
}

impl fmt::Display for RecordStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordStage::Validating => write!(f, "VALIDATING"),
            RecordStage::Deduplicating => write!(f, "DEDUPLICATING"),
            RecordStage::Transforming => write!(f, "TRANSFORMING"),
            RecordStage::RuleChecking => write!(f, "RULE_CHECKING"),
            RecordStage::Persisting => write!(f, "PERSISTING"),
        }
    }
}

// ==========================================
// RecordOutcome - terminal state of one record
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordOutcome {
    Succeeded { code: String, detail: String },
    Skipped { code: String, reason: String },
    Failed { code: String, reason: String },
}
