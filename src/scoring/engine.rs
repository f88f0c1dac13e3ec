use serde::Serialize;

use super::address::address_similarity;
use super::phone::normalize_phone;
use super::phonetic::sounds_alike;
use super::similarity::similarity;
use crate::members::{non_empty, MemberRecord};

/// The scoring rules, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    EmailExact,
    MobileExact,
    NameSimilarity,
    NamePhonetic,
    DateOfBirth,
    PostalAddress,
    FatherName,
    MembershipNo,
}

impl Rule {
    /// Short column label for breakdown output
    pub fn label(&self) -> &'static str {
        match self {
            Rule::EmailExact => "Email",
            Rule::MobileExact => "Mobile",
            Rule::NameSimilarity => "Name",
            Rule::NamePhonetic => "Phonetic",
            Rule::DateOfBirth => "Date of birth",
            Rule::PostalAddress => "Address",
            Rule::FatherName => "Father's name",
            Rule::MembershipNo => "Membership no.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleMatch {
    pub rule: Rule,
    pub points: u32,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: u32,
    /// Human-readable reasons in rule order; may be empty
    pub reasons: Vec<String>,
    /// Same rules as `reasons`, with the points each one added
    pub matches: Vec<RuleMatch>,
}

impl ScoreResult {
    fn add(&mut self, rule: Rule, points: u32, reason: String) {
        self.score += points;
        self.reasons.push(reason.clone());
        self.matches.push(RuleMatch {
            rule,
            points,
            reason,
        });
    }

    fn conclusive(rule: Rule, points: u32, reason: &str) -> Self {
        let mut result = Self::default();
        result.add(rule, points, reason.to_string());
        result
    }
}

/// Score how likely `new_member` duplicates `existing_member`.
///
/// An email or mobile match is conclusive and returns immediately with a
/// fixed score. Otherwise every remaining rule adds its points
/// independently. Missing or unparseable fields never contribute.
pub fn duplicate_score(new_member: &MemberRecord, existing_member: &MemberRecord) -> ScoreResult {
    if let (Some(a), Some(b)) = (
        non_empty(new_member.email.as_deref()),
        non_empty(existing_member.email.as_deref()),
    ) {
        if a.to_lowercase() == b.to_lowercase() {
            return ScoreResult::conclusive(Rule::EmailExact, 100, "Email exact match");
        }
    }

    let mobile_a = normalize_phone(new_member.mobile.as_deref());
    let mobile_b = normalize_phone(existing_member.mobile.as_deref());
    if !mobile_a.is_empty() && mobile_a == mobile_b {
        return ScoreResult::conclusive(Rule::MobileExact, 90, "Mobile number exact match");
    }

    let mut result = ScoreResult::default();

    if let (Some(a), Some(b)) = (
        non_empty(new_member.name.as_deref()),
        non_empty(existing_member.name.as_deref()),
    ) {
        let pct = similarity(Some(a), Some(b));
        if pct >= 90 {
            result.add(
                Rule::NameSimilarity,
                40,
                format!("Name highly similar ({}%)", pct),
            );
        } else if pct >= 75 {
            result.add(
                Rule::NameSimilarity,
                25,
                format!("Name moderately similar ({}%)", pct),
            );
        }

        if sounds_alike(Some(a), Some(b)) {
            result.add(
                Rule::NamePhonetic,
                20,
                "Name sounds similar (phonetic match)".to_string(),
            );
        }
    }

    if let (Some(a), Some(b)) = (
        new_member.date_of_birth.as_ref(),
        existing_member.date_of_birth.as_ref(),
    ) {
        if let (Some(date_a), Some(date_b)) = (a.calendar_date(), b.calendar_date()) {
            if date_a == date_b {
                result.add(
                    Rule::DateOfBirth,
                    30,
                    "Date of birth exact match".to_string(),
                );
            }
        }
    }

    if let (Some(a), Some(b)) = (
        new_member.postal_address.as_ref(),
        existing_member.postal_address.as_ref(),
    ) {
        let pct = address_similarity(Some(a), Some(b));
        if pct >= 80 {
            result.add(
                Rule::PostalAddress,
                25,
                format!("Postal address highly similar ({}%)", pct),
            );
        } else if pct >= 60 {
            result.add(
                Rule::PostalAddress,
                15,
                format!("Postal address moderately similar ({}%)", pct),
            );
        }
    }

    if let (Some(a), Some(b)) = (
        non_empty(new_member.father_name.as_deref()),
        non_empty(existing_member.father_name.as_deref()),
    ) {
        let pct = similarity(Some(a), Some(b));
        if pct >= 80 {
            result.add(
                Rule::FatherName,
                20,
                format!("Father's name highly similar ({}%)", pct),
            );
        }
    }

    if let (Some(a), Some(b)) = (
        non_empty(new_member.membership_no.as_deref()),
        non_empty(existing_member.membership_no.as_deref()),
    ) {
        if a == b {
            result.add(
                Rule::MembershipNo,
                80,
                "Membership number exact match".to_string(),
            );
        }
    }

    result
}
