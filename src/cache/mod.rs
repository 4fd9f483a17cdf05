//! On-disk quote cache
//!
//! The cache is a pretty-printed JSON array of quote records at a fixed
//! path, written once at the end of a full build and read once at startup
//! in cached mode. An absent cache triggers a full rebuild; a corrupt one
//! is a fatal condition, deliberately distinct from absence.

mod store;

pub use store::{CacheError, CacheResult, CacheStore};

use crate::config::SourceConfig;
use crate::extract::Quote;
use crate::fetch;
use crate::Result;
use reqwest::Client;

/// Loads the cache, rebuilding it from the live listing when absent
///
/// # Behavior
///
/// - Store absent: not an error. Runs a full paginated build, saves the
///   result, and returns the freshly built collection.
/// - Store present but undecodable: the error propagates. Corruption is
///   never silently rebuilt over; the caller is expected to terminate with
///   a diagnostic.
/// - Store present and valid: returns the decoded collection as-is.
///
/// # Arguments
///
/// * `store` - The cache store to load from or save into
/// * `client` - HTTP client used if a rebuild is needed
/// * `source` - Listing source configuration for the rebuild
pub async fn load_or_rebuild(
    store: &CacheStore,
    client: &Client,
    source: &SourceConfig,
) -> Result<Vec<Quote>> {
    match store.load() {
        Ok(quotes) => {
            tracing::info!(
                "Loaded {} quotes from {}",
                quotes.len(),
                store.path().display()
            );
            Ok(quotes)
        }
        Err(CacheError::Missing { path }) => {
            tracing::info!(
                "No cache file at {}; building from the live listing",
                path.display()
            );
            let quotes = fetch::fetch_all(client, source).await?;
            store.save(&quotes)?;
            tracing::info!(
                "Built cache with {} quotes at {}",
                quotes.len(),
                store.path().display()
            );
            Ok(quotes)
        }
        Err(e) => Err(e.into()),
    }
}
