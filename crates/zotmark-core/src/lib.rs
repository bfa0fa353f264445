//! zotmark-core - Markdown AST and serialization for Zotero notes
//!
//! This crate provides the data structures a converted note is built from and
//! the serializer that turns them into Obsidian-flavored Markdown. It knows
//! nothing about HTML; the `zotmark` crate produces the AST from a parsed note.
//!
//! # Architecture
//!
//! ```text
//! Note HTML ──▶ Node tree ──▶ ┌──────────────┐
//!                             │ Markdown AST │ ──▶ blocks ──join──▶ Markdown String
//!                             └──────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use zotmark_core::{Block, Inline, Options, serialize};
//!
//! let ast = Block::Document(vec![
//!     Block::Heading {
//!         level: 2,
//!         content: vec![Inline::Text("Summary".to_string())],
//!     },
//!     Block::Paragraph(vec![
//!         Inline::Text("This is ".to_string()),
//!         Inline::Highlight(vec![Inline::Text("important".to_string())]),
//!     ]),
//! ]);
//!
//! let markdown = serialize(&ast, &Options::default());
//! assert_eq!(markdown, "## Summary\n\nThis is ==important==\n");
//! ```

mod ast;
mod options;
mod serialize;

pub use ast::{Block, Inline, ListItem, QuoteEntry};
pub use options::{Options, DEFAULT_ITEM_LINK_BASE};
pub use serialize::{join_blocks, render_block, serialize, serialize_inlines};
