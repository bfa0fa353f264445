//! `obsidian://` links that open a note.
//!
//! Launching the link is left to the caller (a desktop opener, a browser, or
//! just printing it).

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Characters JavaScript's `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Which Obsidian URI scheme to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UriStyle {
    /// Built-in `obsidian://open`
    #[default]
    Standard,
    /// Advanced URI plugin; opens the note in a new pane
    Advanced,
}

/// Build the link that opens `note_path` (relative to the vault root).
pub fn open_uri(vault_name: &str, note_path: &str, style: UriStyle) -> String {
    let vault = utf8_percent_encode(vault_name, URI_COMPONENT);
    let path = utf8_percent_encode(note_path, URI_COMPONENT);
    match style {
        UriStyle::Standard => format!("obsidian://open?vault={vault}&file={path}"),
        UriStyle::Advanced => {
            format!("obsidian://adv-uri?vault={vault}&filepath={path}&newpane=true")
        }
    }
}
