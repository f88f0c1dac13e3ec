use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use member_dedup::config::{self, Config, OutputFormat};
use member_dedup::{matching, members, output, scoring};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DUPLICATE: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a new member record against the registry before saving it
    Check {
        /// JSON file holding the new member record
        new_member: PathBuf,

        #[command(flatten)]
        opts: RegistryOpts,
    },
    /// Show the full score breakdown for two member records
    Compare {
        /// The newly entered member (JSON)
        new_member: PathBuf,

        /// The existing member to compare against (JSON)
        existing_member: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// List likely duplicate pairs already inside the registry
    Scan {
        #[command(flatten)]
        opts: RegistryOpts,
    },
    /// Create a config file interactively
    Init,
}

#[derive(clap::Args, Debug)]
struct RegistryOpts {
    /// Registry export file or glob pattern (repeatable, overrides config)
    #[arg(short, long = "members", value_name = "PATTERN")]
    members: Vec<String>,

    /// Lowest score to report
    #[arg(long)]
    min_score: Option<u32>,

    /// Maximum number of results to print
    #[arg(short, long)]
    limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Parser, Debug)]
#[command(name = "member-dedup")]
#[command(about = "Flag likely duplicate member records", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/member-dedup/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Effective settings after merging command-line flags over the config file
struct Settings {
    patterns: Vec<String>,
    min_score: u32,
    limit: Option<usize>,
    format: OutputFormat,
}

impl Settings {
    fn resolve(opts: RegistryOpts, config: &Config) -> Self {
        Self {
            patterns: if opts.members.is_empty() {
                config.members.clone()
            } else {
                opts.members
            },
            min_score: opts
                .min_score
                .or(config.min_score)
                .unwrap_or(scoring::DUPLICATE_THRESHOLD),
            limit: opts.limit.or(config.limit),
            format: opts.format.or(config.format).unwrap_or_default(),
        }
    }
}

fn init_logging(verbose: bool) {
    // RUST_LOG wins over --verbose when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to initialise logging: {}", e);
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let start_time = Instant::now();

    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = cli.command {
        if let Err(e) = config::init::run_init_wizard(config_path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let code = match cli.command {
        Commands::Check { new_member, opts } => {
            run_check(&new_member, Settings::resolve(opts, &config))
        }
        Commands::Compare {
            new_member,
            existing_member,
            format,
        } => run_compare(
            &new_member,
            &existing_member,
            format.or(config.format).unwrap_or_default(),
        ),
        Commands::Scan { opts } => run_scan(Settings::resolve(opts, &config)),
        Commands::Init => EXIT_SUCCESS,
    };

    debug!(elapsed = ?start_time.elapsed(), exit_code = code, "done");
    std::process::exit(code);
}

fn load_registry(patterns: &[String]) -> Option<Vec<members::MemberRecord>> {
    match members::load_member_sources(patterns) {
        Ok(registry) => {
            info!(count = registry.len(), "loaded member registry");
            Some(registry)
        }
        Err(e) => {
            eprintln!("Failed to load member registry: {:#}", e);
            None
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> i32 {
    match output::format_json(value) {
        Ok(json) => {
            println!("{}", json);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize results: {:#}", e);
            EXIT_INPUT
        }
    }
}

fn report_hidden(total: usize, shown: usize) {
    if total > shown {
        eprintln!("({} more not shown, raise --limit to see them)", total - shown);
    }
}

fn run_check(new_member_path: &std::path::Path, settings: Settings) -> i32 {
    let new_member = match members::load_member(new_member_path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Failed to load new member: {:#}", e);
            return EXIT_INPUT;
        }
    };
    let Some(registry) = load_registry(&settings.patterns) else {
        return EXIT_INPUT;
    };

    let mut candidates = matching::find_candidates(&new_member, &registry, settings.min_score);
    let total = candidates.len();
    let found_duplicate = candidates
        .iter()
        .any(|c| scoring::is_duplicate(c.result.score));
    if let Some(limit) = settings.limit {
        candidates.truncate(limit);
    }

    let use_colors = output::should_use_colors();
    match settings.format {
        OutputFormat::Table => {
            println!("{}", output::format_candidate_table(&candidates, use_colors));
            report_hidden(total, candidates.len());
        }
        OutputFormat::Tsv => {
            if !candidates.is_empty() {
                println!("{}", output::format_tsv(&candidates));
            }
        }
        OutputFormat::Json => {
            let code = print_json(&candidates);
            if code != EXIT_SUCCESS {
                return code;
            }
        }
    }

    if found_duplicate {
        EXIT_DUPLICATE
    } else {
        EXIT_SUCCESS
    }
}

fn run_compare(
    new_member_path: &std::path::Path,
    existing_member_path: &std::path::Path,
    format: OutputFormat,
) -> i32 {
    let loaded = members::load_member(new_member_path)
        .and_then(|a| members::load_member(existing_member_path).map(|b| (a, b)));
    let (new_member, existing_member) = match loaded {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("Failed to load member: {:#}", e);
            return EXIT_INPUT;
        }
    };

    let result = scoring::duplicate_score(&new_member, &existing_member);
    match format {
        OutputFormat::Table => {
            let use_colors = output::should_use_colors();
            println!(
                "{}",
                output::format_breakdown(&new_member, &existing_member, &result, use_colors)
            );
        }
        OutputFormat::Tsv => {
            println!("{}", output::format_score_tsv(&result));
        }
        OutputFormat::Json => {
            let code = print_json(&result);
            if code != EXIT_SUCCESS {
                return code;
            }
        }
    }

    if scoring::is_duplicate(result.score) {
        EXIT_DUPLICATE
    } else {
        EXIT_SUCCESS
    }
}

fn run_scan(settings: Settings) -> i32 {
    let Some(registry) = load_registry(&settings.patterns) else {
        return EXIT_INPUT;
    };

    let mut pairs = matching::scan_registry(&registry, settings.min_score);
    let total = pairs.len();
    let found_duplicate = pairs.iter().any(|p| scoring::is_duplicate(p.result.score));
    if let Some(limit) = settings.limit {
        pairs.truncate(limit);
    }

    match settings.format {
        OutputFormat::Table => {
            let use_colors = output::should_use_colors();
            println!("{}", output::format_pair_table(&pairs, &registry, use_colors));
            report_hidden(total, pairs.len());
        }
        OutputFormat::Tsv => {
            if !pairs.is_empty() {
                println!("{}", output::format_pair_tsv(&pairs));
            }
        }
        OutputFormat::Json => {
            let code = print_json(&pairs);
            if code != EXIT_SUCCESS {
                return code;
            }
        }
    }

    if found_duplicate {
        EXIT_DUPLICATE
    } else {
        EXIT_SUCCESS
    }
}
