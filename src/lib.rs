//! Versewell: a poetry quote fetcher and server
//!
//! This crate fetches short quotes from a paginated public listing, extracts
//! structured records from the HTML, caches them on disk as a JSON array, and
//! serves one randomly chosen quote per request as a rendered HTML page.

pub mod cache;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod render;
pub mod select;
pub mod serve;

use thiserror::Error;

/// Main error type for Versewell operations
#[derive(Debug, Error)]
pub enum VerseError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error fetching page {page}: {source}")]
    Http { page: u32, source: reqwest::Error },

    #[error("Unexpected status {status} fetching page {page}")]
    HttpStatus { page: u32, status: u16 },

    #[error("Cache error: {0}")]
    Cache(#[from] cache::CacheError),

    #[error("Not enough quotes to pick from: have {have}, need at least {need}")]
    TooFewQuotes { have: usize, need: usize },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid listing URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Versewell operations
pub type Result<T> = std::result::Result<T, VerseError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{extract_quotes, Quote, LINE_BREAK_MARKER};
pub use select::{QuoteSource, SelectionPolicy};
