//! Configuration options for XML output.
//!
//! - [`XmlOptions`]: main configuration struct
//! - [`IndentChar`]: character repeated for each indentation level
//!
//! The engine itself has no configuration; these options only affect how a [`Node`](crate::Node)
//! tree is written as text.
//!
//! ## Examples
//!
//! ```rust
//! use intros_tree::{node, to_xml_string, IndentChar, XmlOptions};
//!
//! let doc = node!({ "Line" => { @"name" = "L1", "Point" => {} } });
//!
//! let compact = to_xml_string(&doc, &XmlOptions::new());
//! assert_eq!(compact, "<Line name=\"L1\"><Point/></Line>");
//!
//! let tabs = XmlOptions::pretty()
//!     .with_declaration(false)
//!     .with_indent_char(IndentChar::Tab)
//!     .with_indent(1);
//! assert_eq!(
//!     to_xml_string(&doc, &tabs),
//!     "<Line name=\"L1\">\n\t<Point/>\n</Line>\n"
//! );
//! ```

/// Indentation character for pretty-printed output.
///
/// # Examples
///
/// ```rust
/// use intros_tree::IndentChar;
///
/// assert_eq!(IndentChar::Space.as_char(), ' ');
/// assert_eq!(IndentChar::Tab.as_char(), '\t');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum IndentChar {
    #[default]
    Space,
    Tab,
}

impl IndentChar {
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            IndentChar::Space => ' ',
            IndentChar::Tab => '\t',
        }
    }
}

/// Configuration options for writing a document as XML.
///
/// # Examples
///
/// ```rust
/// use intros_tree::XmlOptions;
///
/// // Single line, no declaration
/// let options = XmlOptions::new();
///
/// // One element per line, 2-space indent, with an XML declaration
/// let options = XmlOptions::pretty();
///
/// // Custom configuration
/// let options = XmlOptions::pretty().with_indent(4).with_declaration(false);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlOptions {
    pub indent: usize,
    pub indent_char: IndentChar,
    pub pretty: bool,
    pub declaration: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        XmlOptions {
            indent: 2,
            indent_char: IndentChar::default(),
            pretty: false,
            declaration: false,
        }
    }
}

impl XmlOptions {
    /// Creates default options (single line, no declaration, 2-space indent when pretty).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intros_tree::XmlOptions;
    ///
    /// let options = XmlOptions::new();
    /// assert_eq!(options.indent, 2);
    /// assert!(!options.pretty);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for indented output preceded by an XML declaration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intros_tree::XmlOptions;
    ///
    /// let options = XmlOptions::pretty();
    /// assert!(options.pretty);
    /// assert!(options.declaration);
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        XmlOptions {
            pretty: true,
            declaration: true,
            ..Default::default()
        }
    }

    /// Sets the number of indentation characters per level.
    ///
    /// Only affects pretty-printed output.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_indent_char(mut self, indent_char: IndentChar) -> Self {
        self.indent_char = indent_char;
        self
    }

    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Controls the `<?xml version="1.0" encoding="utf-8"?>` line.
    #[must_use]
    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    pub(crate) fn indent_unit(&self) -> String {
        std::iter::repeat(self.indent_char.as_char())
            .take(self.indent)
            .collect()
    }
}
