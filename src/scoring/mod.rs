pub mod address;
pub mod confidence;
pub mod engine;
pub mod phone;
pub mod phonetic;
pub mod similarity;

pub use address::address_similarity;
pub use confidence::{confidence_level, is_duplicate, ConfidenceLevel, DUPLICATE_THRESHOLD};
pub use engine::{duplicate_score, Rule, RuleMatch, ScoreResult};
pub use phone::normalize_phone;
pub use phonetic::{phonetic_code, sounds_alike};
pub use similarity::{levenshtein, similarity};
