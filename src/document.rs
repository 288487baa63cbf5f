//! The generic document tree.
//!
//! A [`Node`] carries an optional text value, an attribute bag, and an ordered list of named
//! children. Children sharing a name are siblings in document order, which is how repeated
//! elements are represented. A document is simply a node without a name of its own; its
//! top-level children are the root elements.
//!
//! ## Examples
//!
//! ```rust
//! use intros_tree::Node;
//!
//! let mut doc = Node::new();
//! let line = doc.add_child("Line");
//! line.set_attribute("name", "L1");
//! line.add_child("Point").set_attribute("x", "1.0");
//! line.add_child("Point").set_attribute("x", "3.0");
//!
//! let line = doc.child("Line").unwrap();
//! assert_eq!(line.attribute("name"), Some("L1"));
//! assert_eq!(line.children_with_key("Point").count(), 2);
//! ```

use crate::Attributes;
use serde::{Deserialize, Serialize};

/// A node of the generic document tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    attributes: Attributes,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<(String, Node)>,
}

/// The document produced by encoding and consumed by decoding.
///
/// This is the unnamed outer node whose children are the root elements.
pub type Document = Node;

impl Node {
    /// Creates an empty node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node that only carries text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intros_tree::Node;
    ///
    /// let node = Node::with_text("hello");
    /// assert_eq!(node.text(), Some("hello"));
    /// ```
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Node {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Returns `true` if the node has no text, no attributes and no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.attributes.is_empty() && self.children.is_empty()
    }

    // -------------------------------------------------------------------------
    // Text

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn take_text(&mut self) -> Option<String> {
        self.text.take()
    }

    // -------------------------------------------------------------------------
    // Attributes

    /// Returns the value of attribute `key`.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key)
    }

    /// Sets attribute `key`, replacing any previous value.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key, value);
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    // -------------------------------------------------------------------------
    // Children

    /// Returns the first child named `key`.
    #[must_use]
    pub fn child(&self, key: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, node)| node)
    }

    /// Returns the first child named `key`, mutably.
    pub fn child_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.children
            .iter_mut()
            .find(|(name, _)| name == key)
            .map(|(_, node)| node)
    }

    /// Appends an empty child named `key` and returns it.
    ///
    /// Existing children with the same name are kept; the new one becomes their last sibling.
    pub fn add_child(&mut self, key: impl Into<String>) -> &mut Node {
        self.push_child(key, Node::new())
    }

    /// Appends `child` under `key` and returns it.
    pub fn push_child(&mut self, key: impl Into<String>, child: Node) -> &mut Node {
        self.children.push((key.into(), child));
        let last = self.children.len() - 1;
        &mut self.children[last].1
    }

    /// Returns the first child named `key`, appending an empty one if there is none.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intros_tree::Node;
    ///
    /// let mut node = Node::new();
    /// node.child_or_insert("signlights").set_attribute("activePlan", "0");
    /// node.child_or_insert("signlights").add_child("signlight");
    ///
    /// assert_eq!(node.children_with_key("signlights").count(), 1);
    /// ```
    pub fn child_or_insert(&mut self, key: &str) -> &mut Node {
        match self.children.iter().position(|(name, _)| name == key) {
            Some(index) => &mut self.children[index].1,
            None => self.add_child(key),
        }
    }

    /// Iterates over the children named `key`, in document order.
    pub fn children_with_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children
            .iter()
            .filter(move |(name, _)| name == key)
            .map(|(_, node)| node)
    }

    /// Iterates over all children as `(name, node)` pairs, in document order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Returns the name of the first child, which for a document is its root element.
    #[must_use]
    pub fn first_child_name(&self) -> Option<&str> {
        self.children.first().map(|(name, _)| name.as_str())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::with_text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::with_text(text)
    }
}
