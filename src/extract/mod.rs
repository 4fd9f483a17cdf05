//! Quote extraction from listing HTML
//!
//! This module turns one page of listing markup into structured quote
//! records, tolerating per-block malformation: a broken block is dropped
//! (and counted), the rest of the page is still extracted.

mod parser;
mod quote;

pub use parser::{extract_quotes, extract_quotes_with_stats, ExtractStats};
pub use quote::{Quote, LINE_BREAK_MARKER};
