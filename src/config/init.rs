use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, validate_config, Config, OutputFormat};
use crate::scoring::DUPLICATE_THRESHOLD;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

fn validate_pattern(pattern: &str) -> Result<(), String> {
    let probe = Config {
        members: vec![pattern.to_string()],
        ..Default::default()
    };
    validate_config(&probe).map_err(|errors| errors.join("; "))
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("member-dedup configuration");
    println!("==========================");
    println!();

    // 1. Registry exports
    println!("Where are the member registry exports? Use one JSON file per line,");
    println!("glob patterns are allowed (e.g. 'exports/members-*.json').");
    let mut members: Vec<String> = Vec::new();
    loop {
        let pattern = loop {
            let p = prompt("Members file or pattern: ")?;
            if p.is_empty() {
                println!("  A path is required.");
                continue;
            }
            match validate_pattern(&p) {
                Ok(()) => break p,
                Err(e) => println!("  Invalid: {}. Try again.", e),
            }
        };
        members.push(pattern);

        if !prompt_yes_no("Add another source?", false)? {
            break;
        }
    }

    // 2. Reporting threshold
    println!();
    println!(
        "Pairs scoring {} or more are treated as likely duplicates.",
        DUPLICATE_THRESHOLD
    );
    println!("Lower the reporting threshold to also see weaker matches.");
    let min_score: u32 = loop {
        let input = prompt_with_default("Minimum score to report", &DUPLICATE_THRESHOLD.to_string())?;
        match input.parse::<u32>() {
            Ok(v) => break v,
            Err(_) => println!("  Invalid: must be a non-negative whole number. Try again."),
        }
    };

    // 3. Result limit
    let limit: usize = loop {
        let input = prompt_with_default("Maximum results to show", "10")?;
        match input.parse::<usize>() {
            Ok(v) if v >= 1 => break v,
            _ => println!("  Invalid: must be at least 1. Try again."),
        }
    };

    // 4. Output format
    let format = loop {
        let input = prompt_with_default("Output format (table/tsv/json)", "table")?;
        match OutputFormat::parse(&input) {
            Some(f) => break f,
            None => println!("  Invalid: choose table, tsv or json."),
        }
    };

    // 5. Config path
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 6. Write config
    let config = Config {
        members,
        min_score: Some(min_score),
        limit: Some(limit),
        format: Some(format),
    };
    write_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `member-dedup check new-member.json` to check a record before saving it.");

    Ok(())
}

/// Serialize `config` as YAML and write it atomically, creating parent
/// directories as needed.
pub fn write_config(path: &std::path::Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit().context("Failed to save config")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use std::env;

    #[test]
    fn test_validate_pattern() {
        assert!(validate_pattern("exports/*.json").is_ok());
        assert!(validate_pattern("exports/[.json").is_err());
    }

    #[test]
    fn test_write_config_roundtrip() {
        let dir = env::temp_dir().join("member_dedup_test_write_config");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("config.yaml");

        let config = Config {
            members: vec!["exports/*.json".to_string()],
            min_score: Some(40),
            limit: Some(3),
            format: Some(OutputFormat::Tsv),
        };
        write_config(&path, &config).unwrap();

        let loaded = load_config(Some(path)).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
