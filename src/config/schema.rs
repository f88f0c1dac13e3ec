use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration file contents.
///
/// Example YAML:
/// ```yaml
/// members:
///   - "~/ashram/exports/members-*.json"
/// min_score: 50
/// limit: 10
/// format: table
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Glob patterns for member registry exports (JSON); a leading `~` is
    /// the home directory
    #[serde(default)]
    pub members: Vec<String>,

    /// Lowest score to report (default: the duplicate threshold, 50)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<u32>,

    /// Maximum number of results to print
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Default output format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "tsv" => Some(OutputFormat::Tsv),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Table => "table",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
members:
  - "exports/members-*.json"
  - "exports/legacy.json"
min_score: 60
limit: 5
format: tsv
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.members.len(), 2);
        assert_eq!(config.min_score, Some(60));
        assert_eq!(config.limit, Some(5));
        assert_eq!(config.format, Some(OutputFormat::Tsv));
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "members: []\nthreshold: 40\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            members: vec!["members.json".to_string()],
            min_score: Some(50),
            limit: None,
            format: Some(OutputFormat::Json),
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse(" table "), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::parse("csv"), None);
    }
}
