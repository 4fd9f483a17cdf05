//! HTML rendering for served quotes
//!
//! Turns one quote into the standalone HTML page returned to clients. This
//! is the only place the stored line-break marker is substituted for a real
//! `<br/>` tag; storage and extraction always keep the marker.

use crate::extract::{Quote, LINE_BREAK_MARKER};

/// Inline stylesheet for the served page
const STYLE: &str = "<style type=\"text/css\">\n\
    table.center { margin: 0 auto; font-size: 30px; }\n\
    td:empty::after { content: \"\\00a0\"; }\n\
    html, body { background-color: #303030; color: #F8F8F8; height: 100%; width: 100%; }\n\
    </style>\n";

/// Replaces the stored line-break marker with an HTML line break
///
/// The surrounding text is left untouched.
pub fn restore_line_breaks(text: &str) -> String {
    text.replace(LINE_BREAK_MARKER, "<br/>")
}

/// Escapes text for safe inclusion in HTML element content
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders a quote as a standalone HTML page
///
/// The page is a centered table: a few spacer rows, the source work (when
/// present), the quote text with restored line breaks, and a right-aligned
/// attribution row.
///
/// # Arguments
///
/// * `quote` - The quote to render
pub fn render_quote_page(quote: &Quote) -> String {
    // Escape first, then restore markers: the marker itself is plain
    // alphanumeric text and survives escaping.
    let text = restore_line_breaks(&escape_html(&quote.text));
    let author = escape_html(&quote.author);

    let mut html = String::new();
    html.push_str("<html>\n<head>\n");
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n<table class=\"center\">\n");
    html.push_str("<tr><td></td></tr>\n");
    html.push_str("<tr><td></td></tr>\n");
    html.push_str("<tr><td></td></tr>\n");

    if let Some(book) = &quote.book {
        html.push_str("<tr><td></td></tr>\n");
        html.push_str(&format!(
            "<tr align=\"center\"><td>{}</td></tr>\n",
            escape_html(book)
        ));
    }

    html.push_str("<tr><td></td></tr>\n");
    html.push_str(&format!("<tr><td>{}</td></tr>\n", text));
    html.push_str("<tr><td></td></tr>\n");
    html.push_str(&format!(
        "<tr align=\"right\"><td>By {}</td></tr>\n",
        author
    ));
    html.push_str("</table>\n</body>\n</html>\n");

    html
}
