//! Integration tests for the quote pipeline
//!
//! These tests use wiremock to stand in for the remote listing and
//! exercise the full fetch → extract → cache → select path end-to-end.

use std::time::{Duration, Instant};
use tempfile::TempDir;
use versewell::cache::{load_or_rebuild, CacheError, CacheStore};
use versewell::config::SourceConfig;
use versewell::fetch::{build_http_client, fetch_all, fetch_one};
use versewell::render::render_quote_page;
use versewell::select::{QuoteSource, SelectionPolicy};
use versewell::VerseError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds one listing-style quote block
fn quote_block(text: &str, author: &str) -> String {
    format!(
        "<div class=\"quoteText\">\n  {}\n  &mdash;\n  \
         <span class=\"authorOrTitle\">{},</span>\n</div>",
        text, author
    )
}

/// Wraps quote blocks into a full listing page
fn listing_page(blocks: &[String]) -> String {
    format!(
        "<html><body><div class=\"quotes\">{}</div></body></html>",
        blocks.join("\n")
    )
}

/// One page with `count` quotes attributed to "Author <page>-<i>"
fn page_body(page: u32, count: usize) -> String {
    let blocks: Vec<String> = (0..count)
        .map(|i| quote_block(&format!("Quote {}-{}.", page, i), &format!("Author {}-{}", page, i)))
        .collect();
    listing_page(&blocks)
}

/// Creates a test source pointed at the mock server
fn test_source(listing_url: &str, pages: u32, delay_ms: u64) -> SourceConfig {
    SourceConfig {
        listing_url: listing_url.to_string(),
        cache_pages: pages,
        live_page_max: 1,
        fetch_delay_ms: delay_ms,
    }
}

/// Mounts one listing page at `?page=<n>`, expected to be hit exactly once
async fn mount_page(server: &MockServer, page: u32, body: String) {
    Mock::given(method("GET"))
        .and(path("/quotes"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_all_issues_one_request_per_page_in_order() {
    let server = MockServer::start().await;
    for page in 1..=3 {
        mount_page(&server, page, page_body(page, 2)).await;
    }

    let client = build_http_client().unwrap();
    let source = test_source(&format!("{}/quotes", server.uri()), 3, 0);

    let quotes = fetch_all(&client, &source).await.unwrap();

    // 3 pages x 2 quotes, page order then within-page order
    assert_eq!(quotes.len(), 6);
    let authors: Vec<&str> = quotes.iter().map(|q| q.author.as_str()).collect();
    assert_eq!(
        authors,
        vec![
            "Author 1-0",
            "Author 1-1",
            "Author 2-0",
            "Author 2-1",
            "Author 3-0",
            "Author 3-1"
        ]
    );
    // Mock expectations (exactly one hit per page) are verified on drop.
}

#[tokio::test]
async fn test_fetch_all_sleeps_between_pages_but_not_after_last() {
    let server = MockServer::start().await;
    for page in 1..=3 {
        mount_page(&server, page, page_body(page, 1)).await;
    }

    let client = build_http_client().unwrap();
    let delay = Duration::from_millis(300);
    let source = test_source(&format!("{}/quotes", server.uri()), 3, 300);

    let started = Instant::now();
    fetch_all(&client, &source).await.unwrap();
    let elapsed = started.elapsed();

    // Pinned convention: n-1 delays for n pages.
    assert!(
        elapsed >= delay * 2,
        "expected at least two inter-page delays, took {:?}",
        elapsed
    );
    assert!(
        elapsed < delay * 3,
        "expected no delay after the final page, took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_fetch_all_aborts_on_transport_failure() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_body(1, 2)).await;
    Mock::given(method("GET"))
        .and(path("/quotes"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_http_client().unwrap();
    let source = test_source(&format!("{}/quotes", server.uri()), 3, 0);

    let result = fetch_all(&client, &source).await;
    assert!(matches!(
        result,
        Err(VerseError::HttpStatus { page: 2, status: 500 })
    ));
}

#[tokio::test]
async fn test_malformed_blocks_are_dropped_per_page() {
    let server = MockServer::start().await;
    let body = listing_page(&[
        quote_block("Good one.", "Author A"),
        // No author label at all
        "<div class=\"quoteText\">Orphan quote.</div>".to_string(),
        quote_block("Good two.", "Author B"),
    ]);
    mount_page(&server, 1, body).await;

    let client = build_http_client().unwrap();
    let source = test_source(&format!("{}/quotes", server.uri()), 1, 0);

    let quotes = fetch_one(&client, &source, 1).await.unwrap();
    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0].author, "Author A");
    assert_eq!(quotes[1].author, "Author B");
}

#[tokio::test]
async fn test_load_or_rebuild_builds_and_saves_when_cache_missing() {
    let server = MockServer::start().await;
    for page in 1..=2 {
        mount_page(&server, page, page_body(page, 2)).await;
    }

    let dir = TempDir::new().unwrap();
    let store = CacheStore::new(dir.path().join("poetry_cache.json"));
    let client = build_http_client().unwrap();
    let source = test_source(&format!("{}/quotes", server.uri()), 2, 0);

    let built = load_or_rebuild(&store, &client, &source).await.unwrap();

    assert_eq!(built.len(), 4);
    assert!(store.path().exists());
    // The saved file round-trips to the same collection.
    assert_eq!(store.load().unwrap(), built);
}

#[tokio::test]
async fn test_valid_cache_is_served_without_fetching() {
    let server = MockServer::start().await;
    // Any request against the listing would violate this expectation.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = CacheStore::new(dir.path().join("poetry_cache.json"));
    std::fs::write(
        store.path(),
        r#"[{"author":"A","book":null,"poetry":"cached line"}]"#,
    )
    .unwrap();

    let client = build_http_client().unwrap();
    let source = test_source(&format!("{}/quotes", server.uri()), 2, 0);

    let quotes = load_or_rebuild(&store, &client, &source).await.unwrap();
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].text, "cached line");
}

#[tokio::test]
async fn test_corrupt_cache_is_fatal_and_never_rebuilt_over() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = CacheStore::new(dir.path().join("poetry_cache.json"));
    std::fs::write(store.path(), "{ definitely not a json array ]").unwrap();

    let client = build_http_client().unwrap();
    let source = test_source(&format!("{}/quotes", server.uri()), 2, 0);

    let result = load_or_rebuild(&store, &client, &source).await;
    assert!(matches!(
        result,
        Err(VerseError::Cache(CacheError::Corrupt { .. }))
    ));
    // The damaged file is left in place for inspection.
    assert!(store.path().exists());
}

#[tokio::test]
async fn test_live_mode_fetches_fresh_page_per_pick() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quotes"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_body(1, 4)))
        .expect(2)
        .mount(&server)
        .await;

    let client = build_http_client().unwrap();
    // live_page_max = 1 keeps the random page draw deterministic.
    let source_config = test_source(&format!("{}/quotes", server.uri()), 1, 0);
    let source = QuoteSource::live(client, source_config, SelectionPolicy::SkipFirst);

    for _ in 0..2 {
        let quote = source.pick_random().await.unwrap();
        assert!(quote.author.starts_with("Author 1-"));
        // Skip-first policy: the page's first quote is never selected.
        assert_ne!(quote.author, "Author 1-0");
    }
}

#[tokio::test]
async fn test_cached_marker_is_rendered_as_line_break() {
    let dir = TempDir::new().unwrap();
    let store = CacheStore::new(dir.path().join("poetry_cache.json"));
    std::fs::write(
        store.path(),
        r#"[{"author":"A","book":null,"poetry":"line199m99line2"}]"#,
    )
    .unwrap();

    let quotes = store.load().unwrap();
    let source = QuoteSource::cached(quotes, SelectionPolicy::Uniform);

    let quote = source.pick_random().await.unwrap();
    // The marker survives storage untouched...
    assert_eq!(quote.text, "line199m99line2");

    // ...and is substituted only at render time.
    let page = render_quote_page(&quote);
    assert!(page.contains("line1<br/>line2"));
}
