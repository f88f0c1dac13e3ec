use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::matching::{Candidate, DuplicatePair};
use crate::members::MemberRecord;
use crate::scoring::{confidence_level, is_duplicate, ConfidenceLevel, ScoreResult};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Fixed-width confidence column, colored by level
fn format_confidence(level: ConfidenceLevel, use_colors: bool) -> String {
    let padded = format!("{:<6}", level.as_str());
    if !use_colors {
        return padded;
    }
    match level {
        ConfidenceLevel::High => padded.red().bold().to_string(),
        ConfidenceLevel::Medium => padded.yellow().to_string(),
        ConfidenceLevel::Low => padded.dimmed().to_string(),
    }
}

/// Fit the name column to the terminal, leaving room for reasons
fn fit_name(name: &str, fixed_width: usize, term_width: Option<usize>) -> String {
    match term_width {
        Some(width) if width > fixed_width + 10 => truncate(name, (width - fixed_width).min(32)),
        // Very narrow terminal, show truncated
        Some(_) => truncate(name, 20),
        // No terminal (pipe), don't truncate
        None => name.to_string(),
    }
}

/// Format candidates as a table with columns: Index, Score, Confidence, Name, Reasons
/// Index column: 3 chars (fits "99."), right-aligned
/// Score column is right-aligned, 4 chars wide
pub fn format_candidate_table(candidates: &[Candidate], use_colors: bool) -> String {
    if candidates.is_empty() {
        return "No likely duplicates found.".to_string();
    }

    let term_width = get_terminal_width();
    let separator = "  ";
    // index + space + score + separator + confidence + separator
    let fixed_width = 3 + 1 + 4 + separator.len() * 3 + 6;

    candidates
        .iter()
        .enumerate()
        .map(|(idx, candidate)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = format!("{:>4}", candidate.result.score);
            let name = fit_name(candidate.member.display_name(), fixed_width, term_width);
            let reasons = candidate.result.reasons.join("; ");

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_str.bold(),
                    separator,
                    format_confidence(candidate.confidence, true),
                    separator,
                    name.bold(),
                    separator,
                    reasons.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str,
                    score_str,
                    separator,
                    format_confidence(candidate.confidence, false),
                    separator,
                    name,
                    separator,
                    reasons
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format registry duplicate pairs, one line per pair
/// Pair column shows 1-based registry positions, e.g. "#3 ~ #7"
pub fn format_pair_table(
    pairs: &[DuplicatePair],
    members: &[MemberRecord],
    use_colors: bool,
) -> String {
    if pairs.is_empty() {
        return "No likely duplicates found.".to_string();
    }

    let term_width = get_terminal_width();
    let separator = "  ";

    pairs
        .iter()
        .map(|pair| {
            let score_str = format!("{:>4}", pair.result.score);
            let first = fit_name(members[pair.first].display_name(), 0, term_width);
            let second = fit_name(members[pair.second].display_name(), 0, term_width);
            let names = format!(
                "#{} {} ~ #{} {}",
                pair.first + 1,
                first,
                pair.second + 1,
                second
            );
            let reasons = pair.result.reasons.join("; ");

            if use_colors {
                format!(
                    "{}{}{}{}{}{}{}",
                    score_str.bold(),
                    separator,
                    format_confidence(pair.confidence, true),
                    separator,
                    names,
                    separator,
                    reasons.dimmed()
                )
            } else {
                format!(
                    "{}{}{}{}{}{}{}",
                    score_str,
                    separator,
                    format_confidence(pair.confidence, false),
                    separator,
                    names,
                    separator,
                    reasons
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the per-rule breakdown of a single comparison
pub fn format_breakdown(
    new_member: &MemberRecord,
    existing_member: &MemberRecord,
    result: &ScoreResult,
    use_colors: bool,
) -> String {
    let mut lines = Vec::new();
    let header = format!(
        "{} vs {}",
        new_member.display_name(),
        existing_member.display_name()
    );
    if use_colors {
        lines.push(header.bold().to_string());
    } else {
        lines.push(header);
    }

    if result.matches.is_empty() {
        lines.push("  No matching signals".to_string());
    }
    for rule_match in &result.matches {
        let points = format!("{:>+5}", rule_match.points as i64);
        let label = format!("{:<15}", rule_match.rule.label());
        if use_colors {
            lines.push(format!(
                "  {}  {}{}",
                points.green(),
                label.cyan(),
                rule_match.reason
            ));
        } else {
            lines.push(format!("  {}  {}{}", points, label, rule_match.reason));
        }
    }

    let confidence = confidence_level(result.score);
    let verdict = if is_duplicate(result.score) {
        "likely duplicate"
    } else {
        "probably distinct"
    };
    lines.push(format!(
        "  Score: {} ({} confidence, {})",
        result.score, confidence, verdict
    ));

    lines.join("\n")
}

/// Format candidates as tab-separated values for scripting
/// Columns: score, confidence, name, reasons (no headers, no colors)
pub fn format_tsv(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .map(|candidate| {
            format!(
                "{}\t{}\t{}\t{}",
                candidate.result.score,
                candidate.confidence,
                candidate.member.display_name(),
                candidate.result.reasons.join("; ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single comparison as one tab-separated line
/// Columns: score, confidence, reasons
pub fn format_score_tsv(result: &ScoreResult) -> String {
    format!(
        "{}\t{}\t{}",
        result.score,
        confidence_level(result.score),
        result.reasons.join("; ")
    )
}

/// Format registry pairs as tab-separated values
/// Columns: score, confidence, first index, second index, reasons (1-based indices)
pub fn format_pair_tsv(pairs: &[DuplicatePair]) -> String {
    pairs
        .iter()
        .map(|pair| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                pair.result.score,
                pair.confidence,
                pair.first + 1,
                pair.second + 1,
                pair.result.reasons.join("; ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty-printed JSON for any serializable result
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
