//! Citation spans.
//!
//! The note editor marks a cross-reference as
//! `<span class="citation" data-citation="...">` where `data-citation` is
//! URL-encoded JSON of the shape `{"citationItems": [{"uris": [...]}, ...]}`.
//! Only the first URI of the first cited item is used for the link target.

use log::debug;
use percent_encoding::percent_decode_str;
use serde_json::Value;

use crate::node::Node;

/// Display text of a citation plus the item key it points at, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationReference {
    pub text: String,
    pub item_key: Option<String>,
}

#[derive(Debug, thiserror::Error)]
enum DecodeError {
    #[error("missing data-citation attribute")]
    MissingPayload,

    #[error("invalid citation JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no citationItems[0].uris[0] string")]
    MissingUri,
}

impl CitationReference {
    /// Read a citation span. Never fails: a payload that cannot be decoded
    /// leaves the citation unlinked.
    ///
    /// The display text is the trimmed text of the first `citation-item`
    /// descendant. A span without one is shown unlinked with its own text.
    pub fn from_span(span: &Node) -> Self {
        let Some(item) = span.find_descendant(|n| n.has_class("citation-item")) else {
            debug!("citation span without citation-item; rendering unlinked");
            return Self {
                text: span.text_content().trim().to_string(),
                item_key: None,
            };
        };

        let item_key = span
            .attr("data-citation")
            .ok_or(DecodeError::MissingPayload)
            .and_then(decode_item_key)
            .map_err(|err| debug!("citation left unlinked: {err}"))
            .ok();

        Self {
            text: item.text_content().trim().to_string(),
            item_key,
        }
    }
}

/// Decode a `data-citation` value to the key of the first cited item.
fn decode_item_key(raw: &str) -> Result<String, DecodeError> {
    if raw.is_empty() {
        return Err(DecodeError::MissingPayload);
    }

    let decoded = percent_decode_str(raw).decode_utf8_lossy();
    let payload: Value = serde_json::from_str(&decoded)?;

    let uri = payload
        .get("citationItems")
        .and_then(|items| items.get(0))
        .and_then(|item| item.get("uris"))
        .and_then(|uris| uris.get(0))
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingUri)?;

    Ok(item_key_from_uri(uri).to_string())
}

/// The item key is the last `/`-separated segment of an item URI.
pub fn item_key_from_uri(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}
