use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum score at which a pair is reported as a likely duplicate
pub const DUPLICATE_THRESHOLD: u32 = 50;

const HIGH_CONFIDENCE: u32 = 80;
const MEDIUM_CONFIDENCE: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_duplicate(score: u32) -> bool {
    score >= DUPLICATE_THRESHOLD
}

pub fn confidence_level(score: u32) -> ConfidenceLevel {
    if score >= HIGH_CONFIDENCE {
        ConfidenceLevel::High
    } else if score >= MEDIUM_CONFIDENCE {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}
