mod config;
mod console;
mod items;
mod output;

use clap::Parser;
use handrank_core::{run_session, SessionResult, MIN_ITEMS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::console::StdConsole;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "handrank", version, about = "Rank items by answering pairwise questions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Compare every pair of items from a CSV file and print a ranking
    Rank(RankArgs),
    /// Create a default config file at ~/.config/handrank/config.toml
    Init,
}

#[derive(Parser)]
struct RankArgs {
    /// CSV file with a header row (default: items.csv)
    #[arg(long)]
    items: Option<PathBuf>,

    /// Header of the column holding item names (default: Name)
    #[arg(long)]
    column: Option<String>,

    /// Seed for the pair order, for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Output the ranking as JSON. Prompts go to stderr.
    #[arg(long)]
    json: bool,

    /// Log each decision
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (default: ~/.config/handrank/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "handrank=debug,handrank_core=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank(args) => {
            init_logging(args.verbose);
            run_rank(args);
        }
        Commands::Init => {
            init_logging(false);
            let path = config::config_path();
            config::create_default_config(&path);
            println!("Created config at {}", path.display());
            println!("Edit it to set your default items file, column and seed.");
        }
    }
}

fn run_rank(args: RankArgs) {
    // Load config file, merge with CLI args (CLI wins)
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let items_path = args.items.clone()
        .or_else(|| cfg.items.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_ITEMS_FILE));
    let column = args.column.clone()
        .or(cfg.column)
        .unwrap_or_else(|| items::DEFAULT_COLUMN.to_string());
    let seed = args.seed.or(cfg.seed);

    let items = items::load_items(&items_path, &column).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        Vec::new()
    });

    if items.is_empty() {
        println!("No items to compare. Please check the CSV file.");
        return;
    }
    if items.len() < MIN_ITEMS {
        println!("You need at least two items to perform comparisons.");
        return;
    }

    let total_items = items.len();
    info!(items = total_items, path = %items_path.display(), column = %column, "loaded items");

    let stdin = io::stdin().lock();
    let result = if args.json {
        compare(items, seed, StdConsole::new(stdin, io::stderr()))
    } else {
        compare(items, seed, StdConsole::new(stdin, io::stdout()))
    };

    info!(
        presented = result.summary.presented,
        preferences = result.summary.preferences,
        removed = result.summary.removed,
        discarded = result.summary.discarded,
        exited_early = result.summary.exited_early,
        "session finished"
    );

    if args.json {
        output::print_json(&result, total_items);
    } else {
        output::print_rankings(&result.rankings);
    }
}

/// Run the interactive session through `console`, seeded if asked.
fn compare<R: io::BufRead, W: Write>(items: Vec<String>, seed: Option<u64>, mut console: StdConsole<R, W>) -> SessionResult {
    let outcome = match seed {
        Some(seed) => {
            debug!(seed, "using seeded pair order");
            run_session(items, &mut StdRng::seed_from_u64(seed), &mut console)
        }
        None => run_session(items, &mut rand::rng(), &mut console),
    };
    outcome.unwrap_or_else(|e| bail(e))
}
