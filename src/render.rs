// src/render.rs
//! Presentation builder: pure string formatting for sidebar cards and marker
//! popups. Everything feed-supplied is escaped before it touches markup; the
//! feed is not a trusted input.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::model::NewsItem;

/// Shown when a refresh produced nothing to display.
pub const EMPTY_PLACEHOLDER_TEXT: &str = "No News Here";

/// One sidebar card: title line, time line (raw feed date string, empty when
/// absent), and the item's link list. An item without links gets no link
/// markup at all.
pub fn render_card(item: &NewsItem) -> String {
    let mut out = String::from("<div class=\"news-card\">");
    out.push_str(&format!(
        "<div class=\"news-title\">{}</div>",
        encode_text(&item.description)
    ));
    out.push_str(&format!(
        "<div class=\"news-time\">{}</div>",
        encode_text(&item.date)
    ));

    if !item.links.is_empty() {
        out.push_str("<div class=\"news-links\">");
        for link in &item.links {
            out.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                encode_double_quoted_attribute(&link.url),
                encode_text(&link.source)
            ));
        }
        out.push_str("</div>");
    }

    out.push_str("</div>");
    out
}

/// Merged popup for one marker: one card block per item, in the order the
/// caller sorted them (newest first from the aggregator).
pub fn render_popup(items: &[NewsItem]) -> String {
    let mut out = String::from("<div class=\"news-popup\">");
    for item in items {
        out.push_str(&render_card(item));
    }
    out.push_str("</div>");
    out
}

pub fn empty_placeholder() -> String {
    format!("<div class=\"news-empty\">{EMPTY_PLACEHOLDER_TEXT}</div>")
}
