//! Markdown Abstract Syntax Tree
//!
//! This module defines the AST nodes for a converted note. The node set is
//! deliberately small: it covers exactly what the note editor can express.

/// A block-level Markdown node
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Root note container
    Document(Vec<Block>),

    /// Note whose container held only raw text
    Text(String),

    /// Heading with level (1-6) and inline content
    Heading { level: u8, content: Vec<Inline> },

    /// Paragraph containing inline content
    Paragraph(Vec<Inline>),

    /// Unordered list
    List(Vec<ListItem>),

    /// Block quote, one entry per direct child of the quote element
    BlockQuote(Vec<QuoteEntry>),

    /// Small-print aside (`<small>`), rendered like a paragraph
    Aside(Vec<Inline>),
}

/// A list item holding inline content
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub content: Vec<Inline>,
}

impl ListItem {
    pub fn new(content: Vec<Inline>) -> Self {
        Self { content }
    }
}

/// One child of a block quote
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteEntry {
    /// Raw text sitting directly inside the quote
    Text(String),

    /// Element content; followed by a bare `>` line when non-blank
    Element(Vec<Inline>),
}

/// An inline Markdown node
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    /// Plain text, emitted verbatim
    Text(String),

    /// Strong emphasis (bold)
    Strong(Vec<Inline>),

    /// Emphasis (italic)
    Emphasis(Vec<Inline>),

    /// Bold and italic at once
    StrongEmphasis(Vec<Inline>),

    /// Highlighted text
    Highlight(Vec<Inline>),

    /// Link with text and URL; the URL may be empty
    Link { content: Vec<Inline>, url: String },

    /// Parenthesized citation, linked when the cited item key is known
    Citation {
        text: String,
        item_key: Option<String>,
    },
}

impl Inline {
    /// Convenience constructor for a text node
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text(text.into())
    }
}
