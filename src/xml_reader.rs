//! XML text input for document trees.
//!
//! [`XmlReader`] parses with [`roxmltree`] and converts the single root element into a
//! [`Node`]. Everything `roxmltree` accepts is read: the predefined entities and numeric
//! character references, CDATA sections, entities declared in an internal DTD subset. The XML
//! declaration, processing instructions and comments are dropped. Prefixed names keep their
//! prefix (`xsi:schemaLocation`), and namespace declarations are kept as `xmlns` attributes on
//! the element that declares them.
//!
//! Text handling:
//!
//! - in an element without child elements, text is kept exactly as written;
//! - in an element with child elements, each text run is trimmed, so indentation never becomes
//!   content.
//!
//! Elements nested deeper than [`MAX_DEPTH`] are rejected with a syntax error.
//!
//! ```rust
//! use intros_tree::XmlReader;
//!
//! let doc = XmlReader::new("<?xml version=\"1.0\"?>\n<Line name='L1'>\n  <Point x=\"1.0\"/>\n</Line>")
//!     .read_document()
//!     .unwrap();
//!
//! let line = doc.child("Line").unwrap();
//! assert_eq!(line.attribute("name"), Some("L1"));
//! assert_eq!(line.text(), None);
//! assert_eq!(line.child("Point").and_then(|p| p.attribute("x")), Some("1.0"));
//! ```

use roxmltree::{Document, ParsingOptions, TextPos};

use crate::{Error, Node, Result};

/// Deepest element nesting the reader converts into a tree.
pub const MAX_DEPTH: usize = 512;

/// Reads XML text into a document tree.
pub struct XmlReader<'a> {
    input: &'a str,
}

impl<'a> XmlReader<'a> {
    pub fn new(input: &'a str) -> Self {
        XmlReader {
            input: input.strip_prefix('\u{feff}').unwrap_or(input),
        }
    }

    /// Reads the root element into a document node holding it as its only child.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedEof`] for truncated input and [`Error::Syntax`] for anything
    /// else that is not well formed, including nesting deeper than [`MAX_DEPTH`].
    pub fn read_document(&self) -> Result<Node> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;

        let parsed =
            Document::parse_with_options(self.input, options).map_err(|err| self.convert_error(&err))?;

        let root = parsed.root_element();
        let mut doc = Node::new();
        doc.push_child(qualified_name(root), self.convert_element(&parsed, root, 1)?);
        Ok(doc)
    }

    fn convert_element(
        &self,
        parsed: &Document<'_>,
        element: roxmltree::Node<'_, '_>,
        depth: usize,
    ) -> Result<Node> {
        if depth > MAX_DEPTH {
            let pos = parsed.text_pos_at(element.range().start);
            return Err(self.syntax(
                pos,
                &format!("elements nested deeper than {}", MAX_DEPTH),
                None,
            ));
        }

        let mut node = Node::new();
        for (key, uri) in declared_namespaces(element) {
            node.set_attribute(key, uri);
        }
        for attr in element.attributes() {
            let key = match attr.namespace().and_then(|uri| element.lookup_prefix(uri)) {
                Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, attr.name()),
                _ => attr.name().to_string(),
            };
            node.set_attribute(key, attr.value());
        }

        let mut segments = Vec::new();
        for child in element.children() {
            if child.is_element() {
                let converted = self.convert_element(parsed, child, depth + 1)?;
                node.push_child(qualified_name(child), converted);
            } else if child.is_text() {
                segments.extend(child.text());
            }
        }

        let text: String = if node.child_count() > 0 {
            segments.iter().map(|s| s.trim()).collect()
        } else {
            segments.concat()
        };
        if !text.is_empty() {
            node.set_text(text);
        }
        Ok(node)
    }

    // -------------------------------------------------------------------------
    // Diagnostics

    fn convert_error(&self, err: &roxmltree::Error) -> Error {
        match err {
            roxmltree::Error::UnexpectedEndOfStream | roxmltree::Error::UnclosedRootNode => {
                let (line, col) = self.end_position();
                Error::unexpected_eof(line, col, "closing tag of the root element", self.line_at(line))
            }
            roxmltree::Error::UnexpectedCloseTag(expected, actual, pos) => self.syntax(
                *pos,
                &format!("mismatched closing tag `</{}>`, expected `</{}>`", actual, expected),
                Some(&format!("close `{}` before `{}`", expected, actual)),
            ),
            roxmltree::Error::NoRootNode => self.syntax(
                err.pos(),
                "no root element",
                Some("wrap the content in a single element"),
            ),
            _ => self.syntax(err.pos(), &err.to_string(), None),
        }
    }

    fn syntax(&self, pos: TextPos, msg: &str, suggestion: Option<&str>) -> Error {
        let line = pos.row as usize;
        Error::syntax_with_context(line, pos.col as usize, msg, self.line_at(line), suggestion)
    }

    fn line_at(&self, line: usize) -> &str {
        self.input
            .lines()
            .nth(line.saturating_sub(1))
            .unwrap_or_default()
    }

    fn end_position(&self) -> (usize, usize) {
        let line = self.input.matches('\n').count() + 1;
        let last = self.input.rsplit('\n').next().unwrap_or_default();
        (line, last.chars().count() + 1)
    }
}

/// Element name with its namespace prefix, if it has one.
fn qualified_name(element: roxmltree::Node<'_, '_>) -> String {
    let tag = element.tag_name();
    match tag.namespace().and_then(|uri| element.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, tag.name()),
        _ => tag.name().to_string(),
    }
}

/// Namespaces declared on `element` itself, as `xmlns` attribute pairs.
fn declared_namespaces(element: roxmltree::Node<'_, '_>) -> Vec<(String, String)> {
    let inherited = |name: Option<&str>, uri: &str| {
        element.parent_element().map_or(false, |parent| {
            parent
                .namespaces()
                .any(|ns| ns.name() == name && ns.uri() == uri)
        })
    };

    element
        .namespaces()
        .filter(|ns| ns.name() != Some("xml") && !inherited(ns.name(), ns.uri()))
        .map(|ns| {
            let key = match ns.name() {
                Some(prefix) => format!("xmlns:{}", prefix),
                None => "xmlns".to_string(),
            };
            (key, ns.uri().to_string())
        })
        .collect()
}
