//! Convert a note's Node tree to the Markdown AST
//!
//! Block dispatch happens only on the direct children of the content
//! container; everything below a block is rendered as inline content.

use log::debug;
use zotmark_core::{Block, Inline, ListItem, QuoteEntry};

use crate::citation::CitationReference;
use crate::node::Node;
use crate::style::StyleIntent;

/// Block kinds recognized directly under the content container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    BlockQuote,
    Heading(u8),
    Paragraph,
    List,
    Aside,
    /// Any other tag; dropped from the output
    Unsupported,
}

impl BlockKind {
    fn of(tag: &str) -> Self {
        match tag {
            "blockquote" => BlockKind::BlockQuote,
            "h1" => BlockKind::Heading(1),
            "h2" => BlockKind::Heading(2),
            "h3" => BlockKind::Heading(3),
            "h4" => BlockKind::Heading(4),
            "h5" => BlockKind::Heading(5),
            "h6" => BlockKind::Heading(6),
            "p" => BlockKind::Paragraph,
            "ul" => BlockKind::List,
            "small" => BlockKind::Aside,
            _ => BlockKind::Unsupported,
        }
    }
}

/// How a node renders in inline context. First match wins, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InlineKind<'a> {
    Text(&'a str),
    Citation,
    Styled(StyleIntent),
    Span,
    Strong,
    Emphasis,
    Link,
    PassThrough,
}

impl<'a> InlineKind<'a> {
    fn of(node: &'a Node) -> Self {
        let tag = match node {
            Node::Text(text) => return InlineKind::Text(text),
            Node::Element(element) => element.tag.as_str(),
        };

        match tag {
            "span" if node.has_class("citation") => InlineKind::Citation,
            "span" => match node.attr("style") {
                Some(style) if !style.is_empty() => {
                    InlineKind::Styled(StyleIntent::from_style(style))
                }
                _ => InlineKind::Span,
            },
            "strong" | "b" => InlineKind::Strong,
            "em" | "i" => InlineKind::Emphasis,
            "a" => InlineKind::Link,
            _ => InlineKind::PassThrough,
        }
    }
}

/// Convert a content container to a document.
///
/// A container holding only text becomes a single text block.
pub fn convert(container: &Node) -> Block {
    if container.element_children().next().is_none() {
        let text = container.text_content();
        let text = text.trim();
        return if text.is_empty() {
            Block::Document(Vec::new())
        } else {
            Block::Document(vec![Block::Text(text.to_string())])
        };
    }

    let blocks = container.children().filter_map(convert_block).collect();
    Block::Document(blocks)
}

/// Convert one direct child of the content container.
fn convert_block(node: &Node) -> Option<Block> {
    let tag = match node {
        Node::Text(text) => {
            if !text.trim().is_empty() {
                debug!("dropping top-level text between blocks: {:?}", text.trim());
            }
            return None;
        }
        Node::Element(element) => element.tag.as_str(),
    };

    match BlockKind::of(tag) {
        BlockKind::BlockQuote => Some(convert_blockquote(node)),
        BlockKind::Heading(level) => Some(Block::Heading {
            level,
            content: collect_inlines(node),
        }),
        BlockKind::Paragraph => Some(Block::Paragraph(collect_inlines(node))),
        BlockKind::List => Some(Block::List(
            node.element_children()
                .filter(|child| child.tag_name() == "li")
                .map(|li| ListItem::new(collect_inlines(li)))
                .collect(),
        )),
        BlockKind::Aside => Some(Block::Aside(collect_inlines(node))),
        BlockKind::Unsupported => {
            debug!("dropping unsupported top-level <{tag}>");
            None
        }
    }
}

/// Convert a `blockquote`: raw text children stay text, every element child
/// contributes its rendered inline content.
pub fn convert_blockquote(node: &Node) -> Block {
    let entries = node
        .children()
        .map(|child| match child {
            Node::Text(text) => QuoteEntry::Text(text.clone()),
            Node::Element(_) => QuoteEntry::Element(collect_inlines(child)),
        })
        .collect();
    Block::BlockQuote(entries)
}

/// Collect inline content from the children of a node
pub fn collect_inlines(node: &Node) -> Vec<Inline> {
    let mut inlines = Vec::new();
    for child in node.children() {
        push_inline(child, &mut inlines);
    }
    inlines
}

/// Inline content of a node itself, including its own markup
pub fn inline_content(node: &Node) -> Vec<Inline> {
    let mut inlines = Vec::new();
    push_inline(node, &mut inlines);
    inlines
}

/// Convert a node in inline context. Containers without markup of their own
/// contribute their children directly.
fn push_inline(node: &Node, out: &mut Vec<Inline>) {
    let inline = match InlineKind::of(node) {
        InlineKind::Text(text) => Inline::Text(text.to_string()),

        InlineKind::Citation => {
            let CitationReference { text, item_key } = CitationReference::from_span(node);
            Inline::Citation { text, item_key }
        }

        InlineKind::Styled(intent) => {
            let content = collect_inlines(node);
            match intent {
                StyleIntent::Highlight => Inline::Highlight(content),
                StyleIntent::BoldItalic => Inline::StrongEmphasis(content),
                StyleIntent::Bold => Inline::Strong(content),
                StyleIntent::Italic => Inline::Emphasis(content),
                StyleIntent::Plain => {
                    out.extend(content);
                    return;
                }
            }
        }

        InlineKind::Strong => Inline::Strong(collect_inlines(node)),

        InlineKind::Emphasis => Inline::Emphasis(collect_inlines(node)),

        InlineKind::Link => Inline::Link {
            content: collect_inlines(node),
            url: node.attr("href").unwrap_or_default().to_string(),
        },

        InlineKind::Span | InlineKind::PassThrough => {
            for child in node.children() {
                push_inline(child, out);
            }
            return;
        }
    };
    out.push(inline);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(text: &str) -> Node {
        Node::element("p").with_child(Node::text(text))
    }

    #[test]
    fn test_text_only_container() {
        let div = Node::element("div").with_child(Node::text("  just text \n"));
        assert_eq!(convert(&div), Block::Document(vec![Block::Text("just text".to_string())]));
    }

    #[test]
    fn test_empty_container() {
        let div = Node::element("div").with_child(Node::text("   "));
        assert_eq!(convert(&div), Block::Document(vec![]));
    }

    #[test]
    fn test_block_dispatch() {
        let div = Node::element("div")
            .with_child(Node::element("h3").with_child(Node::text("Head")))
            .with_child(Node::text("\n"))
            .with_child(p("Body"))
            .with_child(Node::element("small").with_child(Node::text("aside")));

        assert_eq!(
            convert(&div),
            Block::Document(vec![
                Block::Heading {
                    level: 3,
                    content: vec![Inline::text("Head")],
                },
                Block::Paragraph(vec![Inline::text("Body")]),
                Block::Aside(vec![Inline::text("aside")]),
            ])
        );
    }

    #[test]
    fn test_unsupported_blocks_and_stray_text_are_dropped() {
        let div = Node::element("div")
            .with_child(Node::text("stray"))
            .with_child(Node::element("table").with_child(Node::text("cells")))
            .with_child(Node::element("div").with_child(p("nested")))
            .with_child(p("kept"));

        assert_eq!(
            convert(&div),
            Block::Document(vec![Block::Paragraph(vec![Inline::text("kept")])])
        );
    }

    #[test]
    fn test_list_uses_direct_li_children_only() {
        let ul = Node::element("ul")
            .with_child(Node::element("li").with_child(Node::text("a")))
            .with_child(Node::text(" "))
            .with_child(Node::element("p").with_child(Node::text("not an item")))
            .with_child(Node::element("li").with_child(Node::text("b")));
        let div = Node::element("div").with_child(ul);

        assert_eq!(
            convert(&div),
            Block::Document(vec![Block::List(vec![
                ListItem::new(vec![Inline::text("a")]),
                ListItem::new(vec![Inline::text("b")]),
            ])])
        );
    }

    #[test]
    fn test_pass_through_flattens() {
        let node = Node::element("p")
            .with_child(Node::element("span").with_child(Node::text("a")))
            .with_child(Node::element("u").with_child(Node::text("b")))
            .with_child(Node::element_with_attrs("span", vec![("style", "color: red")]).with_child(Node::text("c")));

        assert_eq!(
            collect_inlines(&node),
            vec![Inline::text("a"), Inline::text("b"), Inline::text("c")]
        );
    }

    #[test]
    fn test_style_only_applies_to_spans() {
        let node = Node::element_with_attrs("div", vec![("style", "font-weight: bold")])
            .with_child(Node::text("x"));
        assert_eq!(inline_content(&node), vec![Inline::text("x")]);
    }

    #[test]
    fn test_citation_class_only_applies_to_spans() {
        let node = Node::element_with_attrs("div", vec![("class", "citation")]).with_child(Node::text("x"));
        assert_eq!(inline_content(&node), vec![Inline::text("x")]);
    }

    #[test]
    fn test_blockquote_entries() {
        let quote = Node::element("blockquote")
            .with_child(Node::text("raw"))
            .with_child(p("para"));
        assert_eq!(
            convert_blockquote(&quote),
            Block::BlockQuote(vec![
                QuoteEntry::Text("raw".to_string()),
                QuoteEntry::Element(vec![Inline::text("para")]),
            ])
        );
    }
}
