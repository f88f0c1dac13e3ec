/// Edit distance between two strings, counted in characters.
///
/// Insertions, deletions and substitutions all cost 1.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Case-insensitive similarity of two optional strings as a percentage.
///
/// Two blank inputs are a perfect match; one blank input scores 0.
pub fn similarity(a: Option<&str>, b: Option<&str>) -> u32 {
    let a = a.unwrap_or_default();
    let b = b.unwrap_or_default();

    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 100,
        (true, false) | (false, true) => return 0,
        (false, false) => {}
    }

    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let max_len = a.chars().count().max(b.chars().count());
    let distance = levenshtein(&a, &b);

    ((1.0 - distance as f64 / max_len as f64) * 100.0).round() as u32
}
