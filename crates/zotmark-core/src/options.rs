//! Configuration options for Markdown serialization

/// Link prefix that selects an item in the desktop Zotero library.
pub const DEFAULT_ITEM_LINK_BASE: &str = "zotero://select/library/items/";

/// Options for Markdown serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Prefix joined with a citation's item key to form its link target
    pub item_link_base: String,

    /// Strong delimiter
    pub strong_delimiter: String,

    /// Emphasis delimiter
    pub em_delimiter: char,

    /// Highlight delimiter (Obsidian `==mark==` syntax)
    pub highlight_delimiter: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            item_link_base: DEFAULT_ITEM_LINK_BASE.to_string(),
            strong_delimiter: "**".to_string(),
            em_delimiter: '*',
            highlight_delimiter: "==".to_string(),
        }
    }
}

impl Options {
    /// Build the link target for a catalogued item key
    pub fn item_link(&self, item_key: &str) -> String {
        format!("{}{}", self.item_link_base, item_key)
    }
}
