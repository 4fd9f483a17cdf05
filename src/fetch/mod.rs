//! Paginated quote fetching
//!
//! This module drives the extractor across a bounded sequence of listing
//! pages, including:
//! - Building an HTTP client with a proper user agent and timeouts
//! - Fetching a single listing page by page number
//! - Accumulating all pages of a full cache build, with a courtesy delay
//!   between successive fetches and per-page progress reporting
//!
//! There is no retry: a transport failure on any page aborts the whole
//! build so a partial cache is never committed.

mod client;
mod pager;

pub use client::build_http_client;
pub use pager::{fetch_all, fetch_one, fetch_page};
