use super::types::MemberRecord;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A registry export holds either a list of members or a single one
#[derive(Deserialize)]
#[serde(untagged)]
enum MemberFile {
    Many(Vec<MemberRecord>),
    One(Box<MemberRecord>),
}

/// Load member records from a JSON export
///
/// The file may contain a JSON array of members or a single member object.
pub fn load_members(path: &Path) -> Result<Vec<MemberRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open member file at {}", path.display()))?;

    let parsed: MemberFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse member file {}", path.display()))?;

    let members = match parsed {
        MemberFile::Many(members) => members,
        MemberFile::One(member) => vec![*member],
    };

    debug!(path = %path.display(), count = members.len(), "loaded member file");
    Ok(members)
}

/// Load exactly one member record (the record about to be saved)
pub fn load_member(path: &Path) -> Result<MemberRecord> {
    let mut members = load_members(path)?;
    if members.len() != 1 {
        anyhow::bail!(
            "Expected a single member in {}, found {}",
            path.display(),
            members.len()
        );
    }
    Ok(members.remove(0))
}

/// Replace a leading `~` with the home directory; glob does not do it
fn expand_home(pattern: &str) -> String {
    let rest = match pattern.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return pattern.to_string(),
    };
    match dirs::home_dir() {
        Some(home) => format!("{}{}", home.display(), rest),
        None => pattern.to_string(),
    }
}

/// Expand glob patterns and load every matching file
///
/// A leading `~` expands to the home directory. Files are loaded in sorted
/// path order so record indices are stable between runs. A pattern that
/// matches nothing is an error.
pub fn load_member_sources(patterns: &[String]) -> Result<Vec<MemberRecord>> {
    if patterns.is_empty() {
        anyhow::bail!("No member registry configured. Pass --members or set `members` in config");
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for pattern in patterns {
        let mut matched: Vec<PathBuf> = glob::glob(&expand_home(pattern))
            .with_context(|| format!("Invalid members pattern '{}'", pattern))?
            .filter_map(|entry| entry.ok())
            .filter(|p| p.is_file())
            .collect();

        if matched.is_empty() {
            anyhow::bail!("Members pattern '{}' matched no files", pattern);
        }
        matched.sort();
        paths.extend(matched);
    }
    paths.dedup();

    let mut members = Vec::new();
    for path in &paths {
        members.extend(load_members(path)?);
    }
    Ok(members)
}
