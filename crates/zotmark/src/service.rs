//! NoteConverter - the main entry point for note HTML to Markdown conversion.

use zotmark_core::{render_block, serialize, serialize_inlines, Options};

use crate::convert::{convert, convert_blockquote, inline_content};
use crate::html::{content_container, parse_html};
use crate::node::Node;

/// Converts note HTML to Markdown.
///
/// The converter holds only immutable options, so one instance can be shared
/// across threads and used for any number of notes.
#[derive(Debug, Clone, Default)]
pub struct NoteConverter {
    options: Options,
}

impl NoteConverter {
    /// Create a NoteConverter with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a NoteConverter with custom options
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Convert one note's HTML to newline-terminated Markdown
    pub fn convert_note(&self, html: &str) -> String {
        let root = parse_html(html);
        self.convert_tree(&root)
    }

    /// Convert an already parsed note tree
    pub fn convert_tree(&self, root: &Node) -> String {
        let document = convert(content_container(root));
        serialize(&document, &self.options)
    }

    /// Render a node's inline content, including the node's own markup
    pub fn render_inline(&self, node: &Node) -> String {
        serialize_inlines(&inline_content(node), &self.options)
    }

    /// Render a `blockquote` element; `None` when it has no visible lines
    pub fn render_blockquote(&self, node: &Node) -> Option<String> {
        render_block(&convert_blockquote(node), &self.options)
    }
}
