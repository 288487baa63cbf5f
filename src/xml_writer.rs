//! XML text output for document trees.
//!
//! [`XmlWriter`] renders a [`Node`] as XML: each top-level child of the document becomes a root
//! element, attributes keep their insertion order, and nodes without text or children are written
//! as self-closing tags.
//!
//! ```rust
//! use intros_tree::{node, XmlOptions, XmlWriter};
//!
//! let doc = node!({ "Point" => { @"x" = "1.0", @"label" = "a<b" } });
//!
//! let mut writer = XmlWriter::new(XmlOptions::new());
//! writer.write_document(&doc);
//! assert_eq!(writer.into_inner(), "<Point x=\"1.0\" label=\"a&lt;b\"/>");
//! ```

use crate::{Node, XmlOptions};

const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";

/// Writes document trees as XML text.
pub struct XmlWriter {
    output: String,
    options: XmlOptions,
    indent_unit: String,
}

impl XmlWriter {
    pub fn new(options: XmlOptions) -> Self {
        XmlWriter {
            output: String::with_capacity(256),
            indent_unit: options.indent_unit(),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes the document's top-level children as root elements.
    ///
    /// Document-level text and attributes have no XML counterpart and are not written.
    pub fn write_document(&mut self, doc: &Node) {
        if self.options.declaration {
            self.output.push_str(DECLARATION);
            self.write_newline();
        }
        for (name, node) in doc.children() {
            self.write_element(name, node, 0);
        }
    }

    fn write_element(&mut self, name: &str, node: &Node, depth: usize) {
        self.write_indent(depth);
        self.output.push('<');
        self.output.push_str(name);
        for (key, value) in node.attributes().iter() {
            self.output.push(' ');
            self.output.push_str(key);
            self.output.push_str("=\"");
            escape_into(&mut self.output, value, true);
            self.output.push('"');
        }

        if node.text().is_none() && node.child_count() == 0 {
            self.output.push_str("/>");
            self.write_newline();
            return;
        }

        self.output.push('>');
        if let Some(text) = node.text() {
            escape_into(&mut self.output, text, false);
        }
        if node.child_count() > 0 {
            self.write_newline();
            for (child_name, child) in node.children() {
                self.write_element(child_name, child, depth + 1);
            }
            self.write_indent(depth);
        }
        self.output.push_str("</");
        self.output.push_str(name);
        self.output.push('>');
        self.write_newline();
    }

    fn write_newline(&mut self) {
        if self.options.pretty {
            self.output.push('\n');
        }
    }

    fn write_indent(&mut self, depth: usize) {
        if self.options.pretty {
            for _ in 0..depth {
                self.output.push_str(&self.indent_unit);
            }
        }
    }
}

/// Escapes markup characters. Inside attributes, whitespace control characters are written as
/// character references so they survive attribute value normalization.
fn escape_into(output: &mut String, text: &str, attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' if attribute => output.push_str("&quot;"),
            '\n' if attribute => output.push_str("&#10;"),
            '\r' => output.push_str("&#13;"),
            '\t' if attribute => output.push_str("&#9;"),
            _ => output.push(ch),
        }
    }
}
