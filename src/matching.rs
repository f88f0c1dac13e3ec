use serde::Serialize;
use tracing::debug;

use crate::members::MemberRecord;
use crate::scoring::{confidence_level, duplicate_score, ConfidenceLevel, ScoreResult};

/// An existing member that scored against the new one
#[derive(Debug, Clone, Serialize)]
pub struct Candidate<'a> {
    /// Position in the registry as loaded
    pub index: usize,
    pub member: &'a MemberRecord,
    pub result: ScoreResult,
    pub confidence: ConfidenceLevel,
}

/// Two registry records that look like the same person
#[derive(Debug, Clone, Serialize)]
pub struct DuplicatePair {
    pub first: usize,
    pub second: usize,
    pub result: ScoreResult,
    pub confidence: ConfidenceLevel,
}

/// Score `new_member` against every existing record.
///
/// Keeps records scoring at least `min_score`, highest score first; ties
/// keep registry order.
pub fn find_candidates<'a>(
    new_member: &MemberRecord,
    existing: &'a [MemberRecord],
    min_score: u32,
) -> Vec<Candidate<'a>> {
    let mut candidates: Vec<Candidate<'a>> = existing
        .iter()
        .enumerate()
        .filter_map(|(index, member)| {
            let result = duplicate_score(new_member, member);
            (result.score >= min_score).then(|| Candidate {
                index,
                member,
                confidence: confidence_level(result.score),
                result,
            })
        })
        .collect();

    debug!(
        scanned = existing.len(),
        kept = candidates.len(),
        min_score,
        "scored registry"
    );

    // Primary: score descending. Tie-breaker: registry order
    candidates.sort_by(|a, b| b.result.score.cmp(&a.result.score).then(a.index.cmp(&b.index)));
    candidates
}

/// Score every unordered pair in the registry.
///
/// The later record of each pair is treated as the new one, mirroring the
/// order in which records were added.
pub fn scan_registry(members: &[MemberRecord], min_score: u32) -> Vec<DuplicatePair> {
    let mut pairs = Vec::new();
    for (second, newer) in members.iter().enumerate() {
        for (first, older) in members[..second].iter().enumerate() {
            let result = duplicate_score(newer, older);
            if result.score >= min_score {
                pairs.push(DuplicatePair {
                    first,
                    second,
                    confidence: confidence_level(result.score),
                    result,
                });
            }
        }
    }

    debug!(members = members.len(), pairs = pairs.len(), "scanned registry");

    pairs.sort_by(|a, b| {
        b.result
            .score
            .cmp(&a.result.score)
            .then(a.first.cmp(&b.first))
            .then(a.second.cmp(&b.second))
    });
    pairs
}
