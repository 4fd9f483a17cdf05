//! Random quote selection
//!
//! One quote is chosen uniformly at random per request, either from an
//! immutable collection loaded at startup (cached mode) or from a freshly
//! fetched listing page (live mode).

use crate::config::SourceConfig;
use crate::extract::Quote;
use crate::fetch;
use crate::{Result, VerseError};
use reqwest::Client;
use std::sync::Arc;

/// Index policy for random selection
///
/// The original service never returned the first quote of a collection:
/// its random index was drawn from `1..len`. Whether that was a guard
/// against a known-bad first entry or a plain off-by-one was never
/// settled, so the behavior is explicit here, with the historical policy
/// as the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// Draw from `1..len`, never returning index 0 (historical behavior)
    #[default]
    SkipFirst,

    /// Draw from `0..len`
    Uniform,
}

impl SelectionPolicy {
    /// Minimum collection size this policy can select from
    pub fn min_len(self) -> usize {
        match self {
            SelectionPolicy::SkipFirst => 2,
            SelectionPolicy::Uniform => 1,
        }
    }

    /// Draws a random index for a collection of `len` quotes
    ///
    /// Returns `None` when the collection is too small for the policy.
    pub fn pick_index(self, len: usize) -> Option<usize> {
        match self {
            SelectionPolicy::SkipFirst if len >= 2 => Some(fastrand::usize(1..len)),
            SelectionPolicy::Uniform if len >= 1 => Some(fastrand::usize(0..len)),
            _ => None,
        }
    }
}

/// Where random quotes come from
///
/// The source is constructed once at startup and injected into the serving
/// layer; cached collections are shared read-only behind an `Arc` and never
/// mutated after load.
pub enum QuoteSource {
    /// A collection loaded or built at startup; never touches the network
    Cached {
        quotes: Arc<Vec<Quote>>,
        policy: SelectionPolicy,
    },

    /// A fresh listing page fetched on every call
    Live {
        client: Client,
        source: SourceConfig,
        policy: SelectionPolicy,
    },
}

impl QuoteSource {
    /// Creates a cached source over an already built collection
    pub fn cached(quotes: Vec<Quote>, policy: SelectionPolicy) -> Self {
        QuoteSource::Cached {
            quotes: Arc::new(quotes),
            policy,
        }
    }

    /// Creates a live source that fetches a random page per call
    pub fn live(client: Client, source: SourceConfig, policy: SelectionPolicy) -> Self {
        QuoteSource::Live {
            client,
            source,
            policy,
        }
    }

    /// Picks one quote at random
    ///
    /// In cached mode the draw is over the loaded collection. In live mode
    /// a uniformly random page in `1..=live_page_max` is fetched first and
    /// the draw is over that page's extracted quotes; nothing is cached.
    ///
    /// # Returns
    ///
    /// * `Ok(Quote)` - The selected quote
    /// * `Err(VerseError::TooFewQuotes)` - The collection (or fetched page)
    ///   is too small for the selection policy
    /// * `Err(VerseError)` - Live-mode fetch failed
    pub async fn pick_random(&self) -> Result<Quote> {
        match self {
            QuoteSource::Cached { quotes, policy } => pick_from(quotes, *policy),
            QuoteSource::Live {
                client,
                source,
                policy,
            } => {
                let page = fastrand::u32(1..=source.live_page_max);
                tracing::debug!("Live mode: picking from page {}", page);
                let quotes = fetch::fetch_one(client, source, page).await?;
                pick_from(&quotes, *policy)
            }
        }
    }
}

/// Draws one quote from a collection per the selection policy
fn pick_from(quotes: &[Quote], policy: SelectionPolicy) -> Result<Quote> {
    let index = policy
        .pick_index(quotes.len())
        .ok_or(VerseError::TooFewQuotes {
            have: quotes.len(),
            need: policy.min_len(),
        })?;
    Ok(quotes[index].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(len: usize) -> Vec<Quote> {
        (0..len)
            .map(|i| Quote {
                author: format!("Author {}", i),
                book: None,
                text: format!("Quote {}", i),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_skip_first_never_returns_index_zero() {
        let quotes = collection(5);
        let source = QuoteSource::cached(quotes.clone(), SelectionPolicy::SkipFirst);

        let mut seen = [false; 5];
        for _ in 0..500 {
            let quote = source.pick_random().await.unwrap();
            let index = quotes.iter().position(|q| q == &quote).unwrap();
            seen[index] = true;
        }

        assert!(!seen[0], "index 0 must never be selected");
        assert!(
            seen[1] && seen[2] && seen[3] && seen[4],
            "all indices 1..=4 should be reachable, saw {:?}",
            seen
        );
    }

    #[tokio::test]
    async fn test_uniform_can_return_index_zero() {
        let quotes = collection(1);
        let source = QuoteSource::cached(quotes.clone(), SelectionPolicy::Uniform);

        let quote = source.pick_random().await.unwrap();
        assert_eq!(quote, quotes[0]);
    }

    #[tokio::test]
    async fn test_skip_first_rejects_single_quote_collection() {
        let source = QuoteSource::cached(collection(1), SelectionPolicy::SkipFirst);

        let result = source.pick_random().await;
        assert!(matches!(
            result,
            Err(VerseError::TooFewQuotes { have: 1, need: 2 })
        ));
    }

    #[tokio::test]
    async fn test_uniform_rejects_empty_collection() {
        let source = QuoteSource::cached(collection(0), SelectionPolicy::Uniform);

        let result = source.pick_random().await;
        assert!(matches!(
            result,
            Err(VerseError::TooFewQuotes { have: 0, need: 1 })
        ));
    }

    #[test]
    fn test_pick_index_bounds() {
        for _ in 0..200 {
            let index = SelectionPolicy::SkipFirst.pick_index(5).unwrap();
            assert!((1..5).contains(&index));

            let index = SelectionPolicy::Uniform.pick_index(5).unwrap();
            assert!((0..5).contains(&index));
        }

        assert_eq!(SelectionPolicy::SkipFirst.pick_index(1), None);
        assert_eq!(SelectionPolicy::SkipFirst.pick_index(0), None);
        assert_eq!(SelectionPolicy::Uniform.pick_index(0), None);
    }
}
