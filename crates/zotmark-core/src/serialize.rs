//! Markdown AST serialization
//!
//! Converts AST nodes into Markdown text. Each top-level block is rendered on
//! its own, then the rendered blocks are joined by [`join_blocks`].

use crate::ast::{Block, Inline, ListItem, QuoteEntry};
use crate::options::Options;

const LIST_PREFIX: &str = "- ";
const QUOTE_PREFIX: &str = "> ";
const QUOTE_SEPARATOR: &str = ">";

/// Serialize a block to a newline-terminated Markdown string
pub fn serialize(block: &Block, options: &Options) -> String {
    let mut rendered = Vec::new();
    collect_blocks(block, options, &mut rendered);

    let mut output = join_blocks(&rendered);
    output.push('\n');
    output
}

fn collect_blocks(block: &Block, options: &Options, out: &mut Vec<String>) {
    match block {
        Block::Document(blocks) => {
            for block in blocks {
                collect_blocks(block, options, out);
            }
        }
        _ => {
            if let Some(text) = render_block(block, options) {
                out.push(text);
            }
        }
    }
}

/// Render a single block, or `None` when it has nothing to show.
///
/// A nested document renders as its own joined blocks.
pub fn render_block(block: &Block, options: &Options) -> Option<String> {
    match block {
        Block::Document(_) => {
            let mut rendered = Vec::new();
            collect_blocks(block, options, &mut rendered);
            if rendered.is_empty() {
                None
            } else {
                Some(join_blocks(&rendered))
            }
        }

        Block::Text(text) => non_blank(text),

        Block::Heading { level, content } => {
            let mut out = "#".repeat(usize::from(*level));
            out.push(' ');
            out.push_str(&serialize_inlines(content, options));
            Some(out)
        }

        Block::Paragraph(inlines) | Block::Aside(inlines) => {
            non_blank(&serialize_inlines(inlines, options))
        }

        Block::List(items) => serialize_list(items, options),

        Block::BlockQuote(entries) => serialize_blockquote(entries, options),
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn serialize_list(items: &[ListItem], options: &Options) -> Option<String> {
    let lines: Vec<String> = items
        .iter()
        .filter_map(|item| non_blank(&serialize_inlines(&item.content, options)))
        .map(|text| format!("{LIST_PREFIX}{text}"))
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn serialize_blockquote(entries: &[QuoteEntry], options: &Options) -> Option<String> {
    let mut lines: Vec<String> = Vec::new();

    for entry in entries {
        match entry {
            QuoteEntry::Text(text) => push_quoted_lines(text, &mut lines),
            QuoteEntry::Element(inlines) => {
                let text = serialize_inlines(inlines, options);
                if !text.trim().is_empty() {
                    push_quoted_lines(&text, &mut lines);
                    lines.push(QUOTE_SEPARATOR.to_string());
                }
            }
        }
    }

    if lines.last().map(String::as_str) == Some(QUOTE_SEPARATOR) {
        lines.pop();
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn push_quoted_lines(text: &str, lines: &mut Vec<String>) {
    for line in text.trim().split('\n') {
        let line = line.trim();
        if !line.is_empty() {
            lines.push(format!("{QUOTE_PREFIX}{line}"));
        }
    }
}

/// Join rendered blocks, keeping consecutive list items and consecutive quote
/// lines together and putting a blank line between anything else.
pub fn join_blocks<S: AsRef<str>>(blocks: &[S]) -> String {
    let mut output = String::new();
    let mut prev: Option<&str> = None;

    for block in blocks {
        let block = block.as_ref();
        if let Some(prev) = prev {
            let same_list = block.starts_with(LIST_PREFIX) && prev.starts_with(LIST_PREFIX);
            let same_quote = block.starts_with(QUOTE_PREFIX) && prev.starts_with(QUOTE_PREFIX);
            output.push_str(if same_list || same_quote { "\n" } else { "\n\n" });
        }
        output.push_str(block);
        prev = Some(block);
    }

    output
}

/// Serialize inline content without any block structure
pub fn serialize_inlines(inlines: &[Inline], options: &Options) -> String {
    let mut out = String::new();
    for inline in inlines {
        serialize_inline(inline, options, &mut out);
    }
    out
}

fn serialize_inline(inline: &Inline, options: &Options, out: &mut String) {
    match inline {
        Inline::Text(text) => out.push_str(text),

        Inline::Strong(content) => {
            wrap(content, &options.strong_delimiter, options, out);
        }

        Inline::Emphasis(content) => {
            let delimiter = options.em_delimiter.to_string();
            wrap(content, &delimiter, options, out);
        }

        Inline::StrongEmphasis(content) => {
            let delimiter = format!("{}{}", options.strong_delimiter, options.em_delimiter);
            wrap(content, &delimiter, options, out);
        }

        Inline::Highlight(content) => {
            wrap(content, &options.highlight_delimiter, options, out);
        }

        Inline::Link { content, url } => {
            out.push('[');
            for inline in content {
                serialize_inline(inline, options, out);
            }
            out.push_str("](");
            out.push_str(url);
            out.push(')');
        }

        Inline::Citation { text, item_key } => {
            out.push('(');
            match item_key {
                Some(key) => {
                    out.push('[');
                    out.push_str(text);
                    out.push_str("](");
                    out.push_str(&options.item_link(key));
                    out.push(')');
                }
                None => out.push_str(text),
            }
            out.push(')');
        }
    }
}

/// Wrap content in a symmetric delimiter, even when the content is empty
fn wrap(content: &[Inline], delimiter: &str, options: &Options, out: &mut String) {
    out.push_str(delimiter);
    for inline in content {
        serialize_inline(inline, options, out);
    }
    out.push_str(delimiter);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_options() -> Options {
        Options::default()
    }

    fn text(s: &str) -> Inline {
        Inline::text(s)
    }

    #[test]
    fn test_paragraph_is_trimmed() {
        let ast = Block::Paragraph(vec![text("  Hello World \n")]);
        assert_eq!(serialize(&ast, &default_options()), "Hello World\n");
    }

    #[test]
    fn test_blank_paragraph_is_omitted() {
        let ast = Block::Document(vec![
            Block::Paragraph(vec![text(" \n ")]),
            Block::Paragraph(vec![text("kept")]),
        ]);
        assert_eq!(serialize(&ast, &default_options()), "kept\n");
    }

    #[test]
    fn test_heading_levels() {
        let h2 = Block::Heading {
            level: 2,
            content: vec![text("Title")],
        };
        assert_eq!(render_block(&h2, &default_options()).unwrap(), "## Title");

        let h6 = Block::Heading {
            level: 6,
            content: vec![text("Deep")],
        };
        assert_eq!(render_block(&h6, &default_options()).unwrap(), "###### Deep");
    }

    #[test]
    fn test_heading_text_is_not_trimmed() {
        let h1 = Block::Heading {
            level: 1,
            content: vec![text(" spaced ")],
        };
        assert_eq!(render_block(&h1, &default_options()).unwrap(), "#  spaced ");
    }

    #[test]
    fn test_inline_wrappers() {
        let options = default_options();
        assert_eq!(serialize_inlines(&[Inline::Strong(vec![text("x")])], &options), "**x**");
        assert_eq!(serialize_inlines(&[Inline::Emphasis(vec![text("x")])], &options), "*x*");
        assert_eq!(
            serialize_inlines(&[Inline::StrongEmphasis(vec![text("x")])], &options),
            "***x***"
        );
        assert_eq!(serialize_inlines(&[Inline::Highlight(vec![text("x")])], &options), "==x==");
    }

    #[test]
    fn test_empty_strong_still_wrapped() {
        let options = default_options();
        assert_eq!(serialize_inlines(&[Inline::Strong(vec![])], &options), "****");
    }

    #[test]
    fn test_link() {
        let inline = Inline::Link {
            content: vec![text("Example")],
            url: "https://example.com".to_string(),
        };
        assert_eq!(
            serialize_inlines(&[inline], &default_options()),
            "[Example](https://example.com)"
        );

        let bare = Inline::Link {
            content: vec![text("nowhere")],
            url: String::new(),
        };
        assert_eq!(serialize_inlines(&[bare], &default_options()), "[nowhere]()");
    }

    #[test]
    fn test_citation_linked_and_fallback() {
        let options = default_options();
        let linked = Inline::Citation {
            text: "Smith 2020".to_string(),
            item_key: Some("ABCD1234".to_string()),
        };
        assert_eq!(
            serialize_inlines(&[linked], &options),
            "([Smith 2020](zotero://select/library/items/ABCD1234))"
        );

        let unlinked = Inline::Citation {
            text: "Smith 2020".to_string(),
            item_key: None,
        };
        assert_eq!(serialize_inlines(&[unlinked], &options), "(Smith 2020)");
    }

    #[test]
    fn test_custom_item_link_base() {
        let options = Options {
            item_link_base: "zotero://select/groups/42/items/".to_string(),
            ..Default::default()
        };
        let cite = Inline::Citation {
            text: "Doe".to_string(),
            item_key: Some("K1".to_string()),
        };
        assert_eq!(
            serialize_inlines(&[cite], &options),
            "([Doe](zotero://select/groups/42/items/K1))"
        );
    }

    #[test]
    fn test_list_items_skip_blank() {
        let ast = Block::List(vec![
            ListItem::new(vec![text("a")]),
            ListItem::new(vec![text("   ")]),
            ListItem::new(vec![text(" b ")]),
        ]);
        assert_eq!(render_block(&ast, &default_options()).unwrap(), "- a\n- b");
    }

    #[test]
    fn test_empty_list_is_omitted() {
        let ast = Block::List(vec![ListItem::new(vec![text(" ")])]);
        assert_eq!(render_block(&ast, &default_options()), None);
    }

    #[test]
    fn test_blockquote_drops_trailing_separator() {
        let ast = Block::BlockQuote(vec![QuoteEntry::Element(vec![text("hi")])]);
        assert_eq!(render_block(&ast, &default_options()).unwrap(), "> hi");
    }

    #[test]
    fn test_blockquote_paragraph_spacing() {
        let ast = Block::BlockQuote(vec![
            QuoteEntry::Element(vec![text("one\ntwo")]),
            QuoteEntry::Text("\n  ".to_string()),
            QuoteEntry::Element(vec![text("three")]),
        ]);
        assert_eq!(
            render_block(&ast, &default_options()).unwrap(),
            "> one\n> two\n>\n> three"
        );
    }

    #[test]
    fn test_blockquote_text_has_no_separator() {
        let ast = Block::BlockQuote(vec![
            QuoteEntry::Text(" first \n\n second ".to_string()),
            QuoteEntry::Element(vec![text("para")]),
        ]);
        assert_eq!(
            render_block(&ast, &default_options()).unwrap(),
            "> first\n> second\n> para"
        );
    }

    #[test]
    fn test_whitespace_blockquote_is_omitted() {
        let ast = Block::BlockQuote(vec![
            QuoteEntry::Text("  \n ".to_string()),
            QuoteEntry::Element(vec![text(" ")]),
        ]);
        assert_eq!(render_block(&ast, &default_options()), None);
    }

    #[test]
    fn test_join_adjacency() {
        assert_eq!(join_blocks(&["- a", "- b"]), "- a\n- b");
        assert_eq!(join_blocks(&["> a", "> b"]), "> a\n> b");
        assert_eq!(join_blocks(&["para", "- a"]), "para\n\n- a");
        assert_eq!(join_blocks(&["- a", "para"]), "- a\n\npara");
        assert_eq!(join_blocks(&["> a", "- b"]), "> a\n\n- b");
        assert_eq!(join_blocks::<&str>(&[]), "");
    }

    #[test]
    fn test_document_trailing_newline() {
        let ast = Block::Document(vec![
            Block::Paragraph(vec![text("intro")]),
            Block::List(vec![ListItem::new(vec![text("a")]), ListItem::new(vec![text("b")])]),
            Block::Aside(vec![text("small print")]),
        ]);
        assert_eq!(
            serialize(&ast, &default_options()),
            "intro\n\n- a\n- b\n\nsmall print\n"
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(serialize(&Block::Document(vec![]), &default_options()), "\n");
    }
}
