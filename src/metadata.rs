// src/metadata.rs
//! Last-update metadata: the backend stamps its generation time into the
//! second line of a published text document (`# Generated on <timestamp>`).
//! Anything short of a clean match yields a placeholder, never an error.

use once_cell::sync::OnceCell;
use regex::Regex;

/// Display value when the metadata document is missing or malformed.
pub const LAST_UPDATE_PLACEHOLDER: &str = "unknown";

fn generated_re() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"^#\s*Generated on\s+(\S.*)$").expect("valid metadata regex"))
}

/// Extract the generation timestamp from the document's second line.
pub fn parse_last_update(body: &str) -> Option<String> {
    let second_line = body.lines().nth(1)?;
    generated_re()
        .captures(second_line.trim_end())
        .map(|c| c[1].trim().to_string())
}

/// Fetch the metadata document and return its generation timestamp, falling
/// back to [`LAST_UPDATE_PLACEHOLDER`] on any failure.
pub async fn fetch_last_update(url: &str) -> String {
    let body = match reqwest::get(url).await {
        Ok(resp) => match resp.error_for_status() {
            Ok(resp) => resp.text().await.ok(),
            Err(e) => {
                tracing::warn!(error = ?e, url, "metadata document returned error status");
                None
            }
        },
        Err(e) => {
            tracing::warn!(error = ?e, url, "metadata document unreachable");
            None
        }
    };

    body.as_deref()
        .and_then(parse_last_update)
        .unwrap_or_else(|| LAST_UPDATE_PLACEHOLDER.to_string())
}
