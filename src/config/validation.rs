use super::schema::Config;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (i, pattern) in config.members.iter().enumerate() {
        if pattern.trim().is_empty() {
            errors.push(format!("members[{}]: pattern must not be empty", i));
        } else if let Err(e) = glob::Pattern::new(pattern) {
            errors.push(format!("members[{}]: invalid pattern '{}' - {}", i, pattern, e));
        }
    }

    if config.limit == Some(0) {
        errors.push("limit: must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
