//! The in-memory document tree that settings are loaded from and saved to.
//!
//! A [`Node`] is a tag name, its own text, and an ordered list of child nodes.
//! Attributes, comments and processing instructions are not modelled: the
//! mapping engine only ever looks at element names and text.
//!
//! # Path resolution
//!
//! [`Node::resolve`] implements the lookup used for every schema member. A
//! dotted path such as `"Window.Size.Width"` is split on `.`; the first
//! segment is matched against **all descendants** of the node (pre-order,
//! first match wins), and each further segment is matched against the
//! descendants of the node found for the previous one. A missing segment
//! yields `None`, never an error.

/// A named, ordered, nestable document node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    name: String,
    text: String,
    children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// A leaf node holding `text`.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Builder-style [`push`](Self::push).
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node's own text, excluding descendants.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// True when the node carries neither text nor children.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.children.is_empty()
    }

    /// Concatenated text of this node and all its descendants, in document order.
    pub fn value(&self) -> String {
        let mut out = self.text.clone();
        for node in self.descendants() {
            out.push_str(&node.text);
        }
        out
    }

    /// Pre-order iterator over all descendants (the node itself excluded).
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// First descendant (pre-order) named `name`.
    pub fn find_descendant(&self, name: &str) -> Option<&Node> {
        self.descendants().find(|n| n.name == name)
    }

    /// Direct child named `name`.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|n| n.name == name)
    }

    /// Resolve a dotted path against this node's descendants.
    pub fn resolve(&self, dotted: &str) -> Option<&Node> {
        let mut segments = dotted.split('.');
        let first = segments.next()?;
        let mut current = self.find_descendant(first)?;
        for segment in segments {
            current = current.find_descendant(segment)?;
        }
        Some(current)
    }

    /// Get or create the direct child named `name`.
    pub fn ensure_child(&mut self, name: &str) -> &mut Node {
        let idx = match self.children.iter().position(|n| n.name == name) {
            Some(idx) => idx,
            None => {
                self.children.push(Node::new(name));
                self.children.len() - 1
            }
        };
        &mut self.children[idx]
    }
}

/// Iterator returned by [`Node::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
