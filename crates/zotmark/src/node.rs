//! DOM node structure for note conversion.
//!
//! A parsed note is a tree of [`Node`] values. Only the two node kinds the
//! converter cares about are represented; comments, doctypes and processing
//! instructions are discarded by the parser.

const NO_CHILDREN: &[Node] = &[];

/// An element: lower-case tag name, attributes in source order, children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// A DOM node: raw character data or an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Node::Element(Element {
            tag: tag_name.to_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        })
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        Node::Element(Element {
            tag: tag_name.to_lowercase(),
            attributes: attrs
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v.to_string()))
                .collect(),
            children: Vec::new(),
        })
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Node::Text(content.to_string())
    }

    /// Builder-style `add_child`
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Get the tag name (lowercase); `#text` for text nodes
    pub fn tag_name(&self) -> &str {
        match self {
            Node::Element(element) => &element.tag,
            Node::Text(_) => "#text",
        }
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        let Node::Element(element) = self else {
            return None;
        };
        element
            .attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Check whether the whitespace-separated `class` list contains `token`
    pub fn has_class(&self, token: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == token))
    }

    /// Get all child nodes
    pub fn children(&self) -> std::slice::Iter<'_, Node> {
        match self {
            Node::Element(element) => element.children.iter(),
            Node::Text(_) => NO_CHILDREN.iter(),
        }
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    /// Add a child node; ignored for text nodes
    pub fn add_child(&mut self, child: Node) {
        if let Node::Element(element) = self {
            element.children.push(child);
        }
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// First descendant (document order, excluding `self`) matching `pred`
    pub fn find_descendant<F>(&self, pred: F) -> Option<&Node>
    where
        F: Fn(&Node) -> bool + Copy,
    {
        for child in self.children() {
            if pred(child) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(pred) {
                return Some(found);
            }
        }
        None
    }

    /// First descendant element with the given tag
    pub fn find_element(&self, tag: &str) -> Option<&Node> {
        self.find_descendant(|n| n.is_element() && n.tag_name() == tag)
    }
}
