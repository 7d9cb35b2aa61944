use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use listing_rank::listing::{load_listings, sample_catalog, Listing};
use listing_rank::scoring::{rank, validate_rules, ScoringEngine};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 4;
const EXIT_SCORING: i32 = 5;
const EXIT_OUTPUT: i32 = 6;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print each listing's total score, one per line, in input order (default)
    Totals,
    /// List listings sorted by total score, highest first
    Rank {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show the per-rule breakdown of one listing
    Explain {
        /// Index of the listing (1-based, in input order)
        index: usize,
    },
    /// Write the default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "listing-rank")]
#[command(about = "Marketplace listing ranking CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/listing-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Listings file, JSON or YAML (defaults to the built-in sample catalog)
    #[arg(short, long, global = true)]
    input: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Totals);
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    // Init only writes the config; nothing to score
    if let Commands::Init { force } = command {
        let path = match config_path {
            Some(p) => Ok(p),
            None => listing_rank::config::get_config_path(),
        };
        let path = match path {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };
        if let Err(e) = listing_rank::config::write_default_config(&path, force) {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Config written to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match listing_rank::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate rule config at startup
    let rules_config = config.effective_rules();
    if let Err(errors) = validate_rules(&rules_config) {
        eprintln!("Rule config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let mut listings: Vec<Listing> = match cli.input.map(PathBuf::from) {
        Some(path) => match load_listings(&path) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Input error: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
        },
        None => {
            debug!("no input file, using sample catalog");
            sample_catalog()
        }
    };

    let engine = ScoringEngine::new(&rules_config);
    debug!(rules = ?engine.rule_names(), "registered rules");

    if let Err(e) = engine.score(&mut listings) {
        eprintln!("Scoring error: {}", e);
        std::process::exit(EXIT_SCORING);
    }

    info!(
        listings = listings.len(),
        elapsed = ?start_time.elapsed(),
        "scored listings"
    );

    match command {
        Commands::Totals => {
            if !listings.is_empty() {
                println!("{}", listing_rank::output::format_totals(&listings));
            }
        }
        Commands::Rank { format } => {
            let ranked = rank(&listings);
            match format {
                OutputFormat::Table => {
                    let use_colors = listing_rank::output::should_use_colors();
                    println!(
                        "{}",
                        listing_rank::output::format_ranked_table(&ranked, use_colors)
                    );
                }
                OutputFormat::Tsv => {
                    if !ranked.is_empty() {
                        println!("{}", listing_rank::output::format_tsv(&ranked));
                    }
                }
                OutputFormat::Json => {
                    // Same order as the table
                    let ordered: Vec<Listing> =
                        ranked.iter().map(|entry| entry.listing.clone()).collect();
                    match listing_rank::output::format_json(&ordered) {
                        Ok(json) => println!("{}", json),
                        Err(e) => {
                            eprintln!("Output error: {}", e);
                            std::process::exit(EXIT_OUTPUT);
                        }
                    }
                }
            }
        }
        Commands::Explain { index } => {
            // Validate index bounds (1-based)
            if index < 1 || index > listings.len() {
                eprintln!(
                    "Invalid index {}. Must be between 1 and {}.",
                    index,
                    listings.len()
                );
                std::process::exit(EXIT_INPUT);
            }

            let listing = &listings[index - 1];
            let use_colors = listing_rank::output::should_use_colors();
            println!(
                "{}",
                listing_rank::output::format_breakdown(
                    listing,
                    &engine.breakdown(listing),
                    use_colors
                )
            );
        }
        Commands::Init { .. } => {} // Handled before scoring
    }

    std::process::exit(EXIT_SUCCESS);
}
