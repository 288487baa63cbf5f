//! Field path parsing and slot resolution.
//!
//! A field path is a sequence of segments separated by `.`. Every segment except the last names
//! an intermediate child node; the last segment names the slot itself:
//!
//! - an attribute of the node reached through the intermediates, when the field is declared as
//!   an attribute;
//! - the node's own text content, when it is the reserved [`TEXT_SEGMENT`];
//! - a child node otherwise.
//!
//! Paths are parsed once, at registration, into a [`FieldPath`]. Writing creates missing
//! intermediate nodes (reusing the first existing child of each name); reading never creates
//! anything and reports absence instead.
//!
//! ```rust
//! use intros_tree::{FieldPath, Node};
//!
//! let path = FieldPath::scalar("Header.Title.#text", false).unwrap();
//! let mut node = Node::new();
//! path.write_text(&mut node, "Highway".to_string());
//!
//! let title = node.child("Header").and_then(|h| h.child("Title")).unwrap();
//! assert_eq!(title.text(), Some("Highway"));
//! assert_eq!(path.read_text(&node), Some("Highway"));
//! ```

use crate::error::RegistrationError;
use crate::Node;
use std::fmt;

/// Segment separator inside a field path.
pub const SEPARATOR: char = '.';

/// Reserved last segment addressing a node's own text content.
pub const TEXT_SEGMENT: &str = "#text";

/// What the last segment of a path addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Leaf {
    /// An attribute of the parent node.
    Attribute(String),
    /// A child node of the parent node.
    Child(String),
    /// The parent node's own text.
    Text,
}

/// A parsed, validated field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    parents: Vec<String>,
    leaf: Leaf,
}

impl FieldPath {
    /// Parses the path of a scalar field.
    ///
    /// # Errors
    ///
    /// Fails on empty segments, on a text segment that is not last, and on an attribute path
    /// ending in the text segment.
    pub fn scalar(path: &str, is_attribute: bool) -> Result<Self, RegistrationError> {
        let (parents, last) = split(path)?;
        let leaf = if last == TEXT_SEGMENT {
            if is_attribute {
                return Err(RegistrationError::invalid_path(
                    path,
                    "an attribute cannot address text content",
                ));
            }
            Leaf::Text
        } else if is_attribute {
            Leaf::Attribute(last.to_string())
        } else {
            Leaf::Child(last.to_string())
        };

        Ok(FieldPath {
            raw: path.to_string(),
            parents,
            leaf,
        })
    }

    /// Parses the path of a nested-object or collection field.
    ///
    /// Structural fields always address child nodes, so there is no attribute flag.
    ///
    /// # Errors
    ///
    /// Fails on empty segments and on any use of the text segment.
    pub fn structural(path: &str) -> Result<Self, RegistrationError> {
        let (parents, last) = split(path)?;
        if last == TEXT_SEGMENT {
            return Err(RegistrationError::invalid_path(
                path,
                "only scalar fields can address text content",
            ));
        }

        Ok(FieldPath {
            raw: path.to_string(),
            parents,
            leaf: Leaf::Child(last.to_string()),
        })
    }

    /// The path as declared.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn leaf(&self) -> &Leaf {
        &self.leaf
    }

    #[must_use]
    pub fn is_attribute(&self) -> bool {
        matches!(self.leaf, Leaf::Attribute(_))
    }

    /// The slot this path occupies, used to reject colliding fields.
    ///
    /// A scalar written as a child (`a.b`) and one written as that child's text (`a.b.#text`)
    /// occupy the same slot.
    pub(crate) fn slot_key(&self) -> String {
        let mut key = self.parents.join(".");
        let push = |key: &mut String, segment: &str| {
            if !key.is_empty() {
                key.push(SEPARATOR);
            }
            key.push_str(segment);
        };
        match &self.leaf {
            Leaf::Attribute(name) => {
                push(&mut key, "@");
                key.push_str(name);
            }
            Leaf::Child(name) => push(&mut key, name),
            Leaf::Text => {}
        }
        key
    }

    /// Keys of the intermediate nodes this path walks through, outermost first.
    ///
    /// `a.b.c` walks through `a` and `a.b`.
    pub(crate) fn intermediate_keys(&self) -> impl Iterator<Item = String> + '_ {
        (1..=self.parents.len()).map(move |depth| self.parents[..depth].join("."))
    }

    /// Name of the child node addressed by a structural path.
    fn child_key(&self) -> &str {
        match &self.leaf {
            Leaf::Child(name) | Leaf::Attribute(name) => name,
            Leaf::Text => TEXT_SEGMENT,
        }
    }

    // -------------------------------------------------------------------------
    // Read mode

    /// Walks the intermediate chain without creating anything.
    pub fn parent<'a>(&self, node: &'a Node) -> Option<&'a Node> {
        self.parents
            .iter()
            .try_fold(node, |current, segment| current.child(segment))
    }

    /// Reads the text stored at this path, if the slot exists.
    pub fn read_text<'a>(&self, node: &'a Node) -> Option<&'a str> {
        let parent = self.parent(node)?;
        match &self.leaf {
            Leaf::Attribute(name) => parent.attribute(name),
            Leaf::Child(name) => parent.child(name)?.text(),
            Leaf::Text => parent.text(),
        }
    }

    /// Returns the first node at this path.
    pub fn read_node<'a>(&self, node: &'a Node) -> Option<&'a Node> {
        self.parent(node)?.child(self.child_key())
    }

    /// Iterates over every node at this path, in document order.
    ///
    /// A missing intermediate chain yields nothing.
    pub fn read_nodes<'a>(&'a self, node: &'a Node) -> impl Iterator<Item = &'a Node> + 'a {
        self.parent(node)
            .into_iter()
            .flat_map(move |parent| parent.children_with_key(self.child_key()))
    }

    // -------------------------------------------------------------------------
    // Write mode

    /// Walks the intermediate chain, creating missing nodes.
    pub fn parent_mut<'a>(&self, node: &'a mut Node) -> &'a mut Node {
        self.parents
            .iter()
            .fold(node, |current, segment| current.child_or_insert(segment))
    }

    /// Writes text into the slot at this path.
    pub fn write_text(&self, node: &mut Node, text: String) {
        let parent = self.parent_mut(node);
        match &self.leaf {
            Leaf::Attribute(name) => parent.set_attribute(name.as_str(), text),
            Leaf::Child(name) => parent.child_or_insert(name).set_text(text),
            Leaf::Text => parent.set_text(text),
        }
    }

    /// Appends `child` at this path, after any existing siblings of the same name.
    pub fn append_node(&self, node: &mut Node, child: Node) {
        let key = self.child_key().to_string();
        self.parent_mut(node).push_child(key, child);
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_attribute() {
            write!(f, "@{}", self.raw)
        } else {
            f.write_str(&self.raw)
        }
    }
}

fn split(path: &str) -> Result<(Vec<String>, &str), RegistrationError> {
    if path.is_empty() {
        return Err(RegistrationError::invalid_path(path, "path is empty"));
    }

    let segments: Vec<&str> = path.split(SEPARATOR).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(RegistrationError::invalid_path(path, "empty segment"));
    }

    let (last, parents) = match segments.split_last() {
        Some(split) => split,
        None => return Err(RegistrationError::invalid_path(path, "path is empty")),
    };
    if parents.iter().any(|s| *s == TEXT_SEGMENT) {
        return Err(RegistrationError::invalid_path(
            path,
            "the text segment must be last",
        ));
    }

    Ok((parents.iter().map(|s| s.to_string()).collect(), last))
}
