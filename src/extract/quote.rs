use serde::{Deserialize, Serialize};

/// Marker substituted for embedded `<br>` elements during extraction
///
/// The marker survives flattening to plain text and JSON storage, and is
/// swapped back for a real line-break tag at render time only. It is not
/// expected to occur naturally in quote text.
pub const LINE_BREAK_MARKER: &str = "99m99";

/// One extracted quote
///
/// The serialized field names (`author`, `book`, `poetry`) are fixed for
/// compatibility with existing cache files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Author the quote is attributed to
    pub author: String,

    /// Source work, when the listing associates one
    pub book: Option<String>,

    /// The quote text, with embedded line breaks replaced by the marker
    #[serde(rename = "poetry")]
    pub text: String,
}
