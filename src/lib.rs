//! Duplicate detection for community member registries.
//!
//! The [`scoring`] module holds the pure pairwise scorer: string similarity,
//! phone normalization, phonetic codes and address similarity, combined into
//! a weighted [`scoring::ScoreResult`]. The remaining modules load registry
//! exports, rank candidates and format results for the `member-dedup` CLI.

pub mod config;
pub mod matching;
pub mod members;
pub mod output;
pub mod scoring;

pub use matching::{find_candidates, scan_registry, Candidate, DuplicatePair};
pub use members::{AddressRecord, DateOfBirth, MemberRecord};
pub use scoring::{
    address_similarity, confidence_level, duplicate_score, is_duplicate, normalize_phone,
    phonetic_code, similarity, ConfidenceLevel, ScoreResult,
};
