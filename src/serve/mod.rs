//! HTTP serving boundary
//!
//! A minimal axum application: a GET on `/` returns one randomly chosen
//! quote as a rendered HTML page. The quote source is injected at
//! construction and shared read-only across requests; TLS termination is
//! left to the fronting deployment.

use crate::render::render_quote_page;
use crate::select::QuoteSource;
use anyhow::Context;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Shared per-request state: the injected quote source
#[derive(Clone)]
pub struct AppState {
    source: Arc<QuoteSource>,
}

/// Builds the axum application around an injected quote source
pub fn build_app(source: Arc<QuoteSource>) -> Router {
    Router::new()
        .route("/", get(quote_handler))
        .with_state(AppState { source })
}

/// Returns one random quote rendered as an HTML page
///
/// Selection failures (too few quotes, live fetch error) become a 503 so
/// the serving loop itself stays available.
async fn quote_handler(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    match state.source.pick_random().await {
        Ok(quote) => Ok(Html(render_quote_page(&quote))),
        Err(e) => {
            tracing::warn!("Failed to pick a quote: {}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                "No quote available right now".to_string(),
            ))
        }
    }
}

/// Binds the listener and serves quotes until shutdown
///
/// # Arguments
///
/// * `source` - The quote source to serve from
/// * `port` - Port to listen on (all interfaces)
pub async fn run_server(source: Arc<QuoteSource>, port: u16) -> anyhow::Result<()> {
    let app = build_app(source);
    let addr = format!("0.0.0.0:{}", port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!("Serving quotes on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
