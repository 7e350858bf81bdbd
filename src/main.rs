//! pkgscout main entry point
//!
//! This is the command-line interface for searching the package index.

use anyhow::Context;
use clap::Parser;
use pkgscout::config::{load_config, Config, FailurePolicy};
use pkgscout::output::{write_all, PrettyPrinter};
use pkgscout::query::build_query;
use pkgscout::search::Scheduler;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// pkgscout: search a package index from the terminal
///
/// Fetches as many result pages as needed concurrently and prints the
/// matching packages in the order the index ranked them.
#[derive(Parser, Debug)]
#[command(name = "pkgscout")]
#[command(version)]
#[command(about = "Search a package index from the terminal", long_about = None)]
struct Cli {
    /// Search terms
    #[arg(value_name = "TERMS", required = true)]
    terms: Vec<String>,

    /// Number of packages to list
    #[arg(short = 'n', long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// Search for an exact match of the whole phrase
    #[arg(short, long)]
    exact: bool,

    /// Match any of the terms ("yaml OR json") instead of all of them
    #[arg(short = 'o', long = "or")]
    or_combine: bool,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Drop pages that fail to load instead of failing the whole search
    #[arg(long)]
    skip_failed_pages: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Search failed: {:#}", e);
            Err(e)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the listing.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pkgscout=warn,warn"),
            1 => EnvFilter::new("pkgscout=info,warn"),
            2 => EnvFilter::new("pkgscout=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads configuration, runs the search, and prints the results
async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if cli.skip_failed_pages {
        config.search.failure_policy = FailurePolicy::Skip;
    }

    let query = build_query(&cli.terms, cli.exact, cli.or_combine)?;
    tracing::info!("Query: {}", query);

    let scheduler = Scheduler::new(&config)?;
    tracing::debug!("Failure policy: {:?}", scheduler.policy());
    let records = scheduler.run(&query, cli.count as usize).await?;

    if records.is_empty() {
        tracing::warn!("No packages found");
    }

    let stdout = std::io::stdout();
    let mut printer = PrettyPrinter::new(stdout.lock());
    write_all(&mut printer, &records)?;

    Ok(())
}
