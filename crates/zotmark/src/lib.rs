//! # zotmark
//!
//! Convert Zotero note HTML to Obsidian-flavored Markdown.
//!
//! ## Design
//!
//! A note is parsed with scraper into an owned [`Node`] tree, the direct
//! children of its content container are dispatched as blocks, and everything
//! inside a block is rendered as inline Markdown. Rendering and block joining
//! live in `zotmark-core`.
//!
//! Conversion is infallible and pure: unknown tags are dropped, undecodable
//! citation metadata leaves the citation unlinked, and malformed HTML is
//! handled by html5ever's error recovery.
//!
//! Around the converter sit the pieces needed to turn a batch of Zotero items
//! into vault notes: [`batch`] decodes the webhook payload and converts each
//! item's notes, [`vault`] writes note files, and [`uri`] builds the links
//! that open a note in Obsidian.
//!
//! ## Example
//!
//! ```rust
//! use zotmark::NoteConverter;
//!
//! let converter = NoteConverter::new();
//! let markdown = converter.convert_note("<div><h2>Title</h2><ul><li>a</li><li>b</li></ul></div>");
//! assert_eq!(markdown, "## Title\n\n- a\n- b\n");
//! ```

use std::path::PathBuf;

pub mod batch;
mod citation;
mod convert;
pub mod html;
pub mod node;
mod service;
mod style;
pub mod uri;
pub mod vault;

pub use batch::{convert_items, ConvertedItem, ItemRecord, SenderAction, WebhookPayload};
pub use citation::{item_key_from_uri, CitationReference};
pub use html::{content_container, parse_html};
pub use node::{Element, Node};
pub use service::NoteConverter;
pub use style::StyleIntent;
pub use uri::{open_uri, UriStyle};
pub use vault::{Vault, WriteOutcome, WritePolicy};
pub use zotmark_core::{Options, DEFAULT_ITEM_LINK_BASE};

/// Convert one note's HTML with default options
pub fn convert_note(html: &str) -> String {
    NoteConverter::new().convert_note(html)
}

/// Error type for zotmark operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid webhook payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("webhook payload has no sender_id")]
    MissingSender,

    #[error("webhook payload contains no items")]
    EmptyPayload,

    #[error("unknown sender_id `{0}`")]
    UnknownSender(String),

    #[error("citekey `{0}` does not make a usable file name")]
    InvalidCitekey(String),

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
