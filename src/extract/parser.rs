//! Selector-driven quote block parsing
//!
//! Each listing page carries a sequence of `div.quoteText` blocks. Within a
//! block the fields are recovered from tagged markup rather than from line
//! positions:
//!
//! - book (optional): first `a.authorOrTitle` descendant
//! - author (required): first `span.authorOrTitle` descendant
//! - text (required): the block's direct text children, up to the first
//!   child element that is not a `<br>`; each `<br>` becomes the marker
//!
//! A block that fails to yield a required field is dropped on its own;
//! extraction never fails wholesale.

use crate::extract::{Quote, LINE_BREAK_MARKER};
use scraper::{ElementRef, Html, Node, Selector};

/// Why a quote block was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    MissingAuthor,
    EmptyText,
}

/// Counters for one extraction pass over a page
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractStats {
    /// Blocks successfully turned into quotes
    pub extracted: usize,

    /// Blocks dropped because no author label was found
    pub missing_author: usize,

    /// Blocks dropped because the quote text came out empty
    pub empty_text: usize,
}

impl ExtractStats {
    /// Total number of blocks dropped
    pub fn skipped(&self) -> usize {
        self.missing_author + self.empty_text
    }
}

/// Extracts all quote records from one page of listing HTML
///
/// Returns whatever subset of blocks parsed successfully, in document
/// order. A page with no quote blocks yields an empty vector, never an
/// error.
///
/// # Arguments
///
/// * `html` - The raw HTML of one listing page
pub fn extract_quotes(html: &str) -> Vec<Quote> {
    extract_quotes_with_stats(html).0
}

/// Extracts all quote records along with skip counters
///
/// Same behavior as [`extract_quotes`], but also reports how many blocks
/// were dropped and why, so callers can log extraction quality without
/// changing control flow.
pub fn extract_quotes_with_stats(html: &str) -> (Vec<Quote>, ExtractStats) {
    let document = Html::parse_document(html);
    let mut quotes = Vec::new();
    let mut stats = ExtractStats::default();

    let block_selector = match Selector::parse("div.quoteText") {
        Ok(selector) => selector,
        Err(_) => return (quotes, stats),
    };
    let book_selector = Selector::parse("a.authorOrTitle").ok();
    let author_selector = Selector::parse("span.authorOrTitle").ok();

    for block in document.select(&block_selector) {
        match extract_block(&block, book_selector.as_ref(), author_selector.as_ref()) {
            Ok(quote) => {
                stats.extracted += 1;
                quotes.push(quote);
            }
            Err(SkipReason::MissingAuthor) => {
                stats.missing_author += 1;
                tracing::debug!("Skipping quote block without an author label");
            }
            Err(SkipReason::EmptyText) => {
                stats.empty_text += 1;
                tracing::debug!("Skipping quote block with empty text");
            }
        }
    }

    (quotes, stats)
}

/// Extracts a single quote from one `div.quoteText` block
fn extract_block(
    block: &ElementRef,
    book_selector: Option<&Selector>,
    author_selector: Option<&Selector>,
) -> Result<Quote, SkipReason> {
    // Book title association is optional; absence is not an error.
    let book = book_selector
        .and_then(|selector| block.select(selector).next())
        .map(|element| normalize_text(&element.text().collect::<String>()))
        .filter(|title| !title.is_empty());

    let author = author_selector
        .and_then(|selector| block.select(selector).next())
        .map(|element| normalize_text(&element.text().collect::<String>()))
        .map(|label| label.trim_end_matches(',').trim_end().to_string())
        .filter(|label| !label.is_empty())
        .ok_or(SkipReason::MissingAuthor)?;

    let text = flatten_quote_text(block);
    if text.is_empty() {
        return Err(SkipReason::EmptyText);
    }

    Ok(Quote { author, book, text })
}

/// Flattens the quote body of a block to plain text
///
/// Walks the block's direct children in document order: text nodes are
/// appended, `<br>` elements become the line-break marker, and the first
/// other child element (the attribution span, work link, etc.) ends the
/// quote body.
fn flatten_quote_text(block: &ElementRef) -> String {
    let mut raw = String::new();

    for child in block.children() {
        match child.value() {
            Node::Text(text) => raw.push_str(text),
            Node::Element(element) if element.name() == "br" => {
                raw.push_str(LINE_BREAK_MARKER);
            }
            Node::Element(_) => break,
            _ => {}
        }
    }

    trim_markers(&normalize_text(&raw)).to_string()
}

/// Normalizes extracted text
///
/// Drops non-ASCII characters (best effort, not replaced or escaped), then
/// collapses whitespace runs within each marker-delimited segment.
fn normalize_text(text: &str) -> String {
    let ascii: String = text.chars().filter(char::is_ascii).collect();

    ascii
        .split(LINE_BREAK_MARKER)
        .map(|segment| segment.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join(LINE_BREAK_MARKER)
}

/// Strips leading and trailing marker runs
///
/// Quote bodies never legitimately start or end with a line break; stray
/// markers show up when the markup puts a `<br>` right before the
/// attribution line.
fn trim_markers(text: &str) -> &str {
    let mut trimmed = text;
    while let Some(rest) = trimmed.strip_prefix(LINE_BREAK_MARKER) {
        trimmed = rest;
    }
    while let Some(rest) = trimmed.strip_suffix(LINE_BREAK_MARKER) {
        trimmed = rest;
    }
    trimmed
}
