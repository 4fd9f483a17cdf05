use crate::select::SelectionPolicy;
use std::path::PathBuf;

/// Default listing endpoint quotes are fetched from
pub const DEFAULT_LISTING_URL: &str = "https://www.goodreads.com/quotes/tag/poetry";

/// Main configuration structure for Versewell
#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceConfig,
    pub cache: CacheConfig,
    pub server: ServerConfig,
}

/// Remote listing source configuration
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Base URL of the paginated quote listing
    pub listing_url: String,

    /// Number of listing pages fetched during a full cache build
    pub cache_pages: u32,

    /// Highest page number live mode will pick from
    pub live_page_max: u32,

    /// Delay between successive page fetches (milliseconds)
    pub fetch_delay_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            cache_pages: 150,
            live_page_max: 150,
            fetch_delay_ms: 1000,
        }
    }
}

/// On-disk cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Serve from the on-disk cache instead of fetching live per request
    pub cached_mode: bool,

    /// Rebuild the cache at startup even if a valid one exists
    pub force_rebuild: bool,

    /// Path to the JSON cache file
    pub cache_path: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cached_mode: true,
            force_rebuild: false,
            cache_path: PathBuf::from("poetry_cache.json"),
        }
    }
}

/// Serving configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Random selection policy (the historical default skips index 0)
    pub selection: SelectionPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            selection: SelectionPolicy::default(),
        }
    }
}
