//! HTML parsing support.
//!
//! Note HTML is parsed with scraper (html5ever) and copied into the owned
//! [`Node`] tree the converter walks. html5ever never rejects input: malformed
//! markup always yields some tree, at worst a body holding plain text.
//!
//! The copy is capped at [`MAX_DEPTH`] levels. An element at the cap keeps
//! only the text of its subtree, so every later walk over the tree is bounded.

use log::debug;
use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// Deepest element nesting copied from a parsed document, counted from `html`.
pub const MAX_DEPTH: usize = 256;

/// Parse an HTML string into a Node tree rooted at the `html` element.
///
/// # Example
///
/// ```rust
/// use zotmark::{content_container, parse_html};
///
/// let root = parse_html(r#"<div data-schema-version="9"><p>Hello</p></div>"#);
/// assert_eq!(content_container(&root).tag_name(), "div");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_document(html);
    scraper_to_node(document.root_element(), 0)
}

/// Locate the element holding a note's blocks: the first `div` in document
/// order, else the `body`, else the tree itself.
pub fn content_container(root: &Node) -> &Node {
    if root.tag_name() == "div" {
        return root;
    }
    root.find_element("div")
        .or_else(|| (root.tag_name() == "body").then_some(root))
        .or_else(|| root.find_element("body"))
        .unwrap_or(root)
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef, depth: usize) -> Node {
    let tag = element.value().name();

    // Collect attributes
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();

    let mut node = Node::element_with_attrs(tag, attrs);

    if depth >= MAX_DEPTH {
        // ElementRef::text walks the arena iteratively
        let text: String = element.text().collect();
        debug!("flattening <{tag}> nested {depth} levels deep");
        if !text.is_empty() {
            node.add_child(Node::text(&text));
        }
        return node;
    }

    // Process children
    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element, depth + 1));
                }
            }
            _ => {}
        }
    }

    node
}
