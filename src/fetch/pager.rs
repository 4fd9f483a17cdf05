use crate::config::SourceConfig;
use crate::extract::{extract_quotes_with_stats, Quote};
use crate::{Result, VerseError};
use reqwest::Client;
use std::time::Duration;

/// Fetches the raw HTML of one listing page
///
/// Issues a single GET to the listing endpoint with the page number as a
/// query parameter. A non-success status or transport error is returned to
/// the caller; there is no retry or backoff.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `listing_url` - Base URL of the paginated listing
/// * `page` - Page number to fetch (1-based)
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(VerseError)` - Transport failure or unexpected status
pub async fn fetch_page(client: &Client, listing_url: &str, page: u32) -> Result<String> {
    tracing::debug!("Fetching listing page {}", page);

    let response = client
        .get(listing_url)
        .query(&[("page", page)])
        .send()
        .await
        .map_err(|source| VerseError::Http { page, source })?;

    let status = response.status();
    if !status.is_success() {
        return Err(VerseError::HttpStatus {
            page,
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|source| VerseError::Http { page, source })
}

/// Fetches one listing page and extracts its quotes
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `source` - The listing source configuration
/// * `page` - Page number to fetch (1-based)
pub async fn fetch_one(client: &Client, source: &SourceConfig, page: u32) -> Result<Vec<Quote>> {
    let body = fetch_page(client, &source.listing_url, page).await?;
    let (quotes, stats) = extract_quotes_with_stats(&body);

    if stats.skipped() > 0 {
        tracing::debug!(
            "Page {}: dropped {} malformed quote blocks ({} missing author, {} empty text)",
            page,
            stats.skipped(),
            stats.missing_author,
            stats.empty_text
        );
    }

    Ok(quotes)
}

/// Fetches pages `1..=cache_pages` and accumulates all extracted quotes
///
/// Records are kept in page order, then within-page document order, with no
/// deduplication across pages. One progress line is logged per completed
/// page. Between successive pages the task sleeps for the configured
/// courtesy delay; no delay runs after the final page. Any page failure
/// aborts the whole build.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `source` - The listing source configuration
///
/// # Returns
///
/// * `Ok(Vec<Quote>)` - All quotes extracted across the fetched pages
/// * `Err(VerseError)` - A page fetch failed
pub async fn fetch_all(client: &Client, source: &SourceConfig) -> Result<Vec<Quote>> {
    let mut quotes = Vec::new();

    tracing::info!(
        "Building quote collection from {} pages of {}",
        source.cache_pages,
        source.listing_url
    );

    for page in 1..=source.cache_pages {
        let page_quotes = fetch_one(client, source, page).await?;

        tracing::info!(
            "Page {}/{}: {} quotes ({} total)",
            page,
            source.cache_pages,
            page_quotes.len(),
            quotes.len() + page_quotes.len()
        );

        quotes.extend(page_quotes);

        // Courtesy delay toward the remote; nothing left to wait for
        // after the last page. The sleep is an await point, so a caller
        // dropping the build future cancels it cleanly.
        if page < source.cache_pages {
            tokio::time::sleep(Duration::from_millis(source.fetch_delay_ms)).await;
        }
    }

    Ok(quotes)
}
