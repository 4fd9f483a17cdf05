//! Versewell main entry point
//!
//! This is the command-line interface for the Versewell quote server.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use versewell::cache::{load_or_rebuild, CacheStore};
use versewell::config::{validate, CacheConfig, Config, ServerConfig, SourceConfig};
use versewell::fetch::{build_http_client, fetch_all};
use versewell::select::{QuoteSource, SelectionPolicy};
use versewell::serve::run_server;

/// Versewell: a poetry quote server
///
/// Versewell fetches quotes from a public paginated listing, optionally
/// caches them on disk as JSON, and serves one random quote per request
/// as a rendered HTML page.
#[derive(Parser, Debug)]
#[command(name = "versewell")]
#[command(version)]
#[command(about = "A poetry quote server", long_about = None)]
struct Cli {
    /// Serve live from the listing instead of the on-disk cache
    #[arg(long)]
    no_cache: bool,

    /// Number of listing pages fetched during a full cache build
    #[arg(long, default_value_t = 150)]
    cache_pages: u32,

    /// Rebuild the cache at startup even if a valid one exists
    #[arg(long)]
    force_rebuild: bool,

    /// Path of the JSON cache file
    #[arg(long, default_value = "poetry_cache.json")]
    cache_file: PathBuf,

    /// Base URL of the paginated quote listing
    #[arg(long, default_value = versewell::config::DEFAULT_LISTING_URL)]
    listing_url: String,

    /// Delay between page fetches during a build, in milliseconds
    #[arg(long, default_value_t = 1000)]
    fetch_delay_ms: u64,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Allow the first quote of a collection to be selected
    #[arg(long)]
    include_first: bool,

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

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli);
    validate(&config).context("Invalid configuration")?;

    let client = build_http_client().context("Failed to build HTTP client")?;

    let source = if config.cache.cached_mode {
        let store = CacheStore::new(&config.cache.cache_path);

        let quotes = if config.cache.force_rebuild {
            tracing::info!("Force rebuilding quote cache");
            let quotes = fetch_all(&client, &config.source).await?;
            store.save(&quotes)?;
            quotes
        } else {
            match load_or_rebuild(&store, &client, &config.source).await {
                Ok(quotes) => quotes,
                Err(e) => {
                    tracing::error!("Failed to load quote cache: {}", e);
                    tracing::error!(
                        "Deleting {} and restarting will trigger a full rebuild",
                        config.cache.cache_path.display()
                    );
                    std::process::exit(1);
                }
            }
        };

        tracing::info!("Total quotes in cache: {}", quotes.len());
        QuoteSource::cached(quotes, config.server.selection)
    } else {
        if cli.force_rebuild {
            tracing::warn!("--force-rebuild has no effect with --no-cache; ignoring it");
        }
        tracing::info!("Live mode: fetching a fresh listing page per request");
        QuoteSource::live(client, config.source.clone(), config.server.selection)
    };

    run_server(Arc::new(source), config.server.port).await
}

/// Builds the typed configuration from the parsed command line
fn build_config(cli: &Cli) -> Config {
    Config {
        source: SourceConfig {
            listing_url: cli.listing_url.clone(),
            cache_pages: cli.cache_pages,
            live_page_max: 150,
            fetch_delay_ms: cli.fetch_delay_ms,
        },
        cache: CacheConfig {
            cached_mode: !cli.no_cache,
            force_rebuild: cli.force_rebuild,
            cache_path: cli.cache_file.clone(),
        },
        server: ServerConfig {
            port: cli.port,
            selection: if cli.include_first {
                SelectionPolicy::Uniform
            } else {
                SelectionPolicy::SkipFirst
            },
        },
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("versewell=info,warn"),
            1 => EnvFilter::new("versewell=debug,info"),
            2 => EnvFilter::new("versewell=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
