//! # intros_tree
//!
//! Descriptor-driven binding between statically declared Rust types and a generic
//! attribute/element document tree.
//!
//! ## What is it for?
//!
//! Simulation formats such as OpenSCENARIO and OpenDRIVE are large XML dialects made of hundreds
//! of small record types. Writing a reader and a writer for each of them by hand is tedious and
//! error prone. With this crate, each type is described once: a node name and an ordered list of
//! fields, each with a dotted path and an attribute flag. The same description then drives both
//! directions:
//!
//! - **encode**: value → [`Node`] tree
//! - **decode**: [`Node`] tree → value
//!
//! ## Key Features
//!
//! - **Compile-time classification**: every field type is a scalar, a nested described type, or a
//!   collection of those; anything else is rejected at registration or by the compiler
//! - **Flattening paths**: `Header.Title.#text` binds a field to text two levels down, and fields
//!   can share intermediate nodes
//! - **Lenient scalars, strict structure**: missing or malformed leaf text falls back to the
//!   default (and is reported), while a missing required sub-object fails the decode
//! - **Optional sub-objects**: types with an emptiness predicate are left out when empty
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use intros_tree::{decode, encode, Introspect, RegistrationError, TypeDescriptor};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Point {
//!     x: f64,
//!     y: f64,
//! }
//!
//! impl Introspect for Point {
//!     fn describe() -> Result<TypeDescriptor<Self>, RegistrationError> {
//!         TypeDescriptor::<Self>::builder("Point")
//!             .attribute("x", |p| &p.x, |p| &mut p.x)
//!             .attribute("y", |p| &p.y, |p| &mut p.y)
//!             .build()
//!     }
//! }
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Line {
//!     name: String,
//!     points: Vec<Point>,
//! }
//!
//! impl Introspect for Line {
//!     fn describe() -> Result<TypeDescriptor<Self>, RegistrationError> {
//!         TypeDescriptor::<Self>::builder("Line")
//!             .attribute("name", |l| &l.name, |l| &mut l.name)
//!             .element("Point", |l| &l.points, |l| &mut l.points)
//!             .build()
//!     }
//! }
//!
//! let line = Line {
//!     name: "L1".to_string(),
//!     points: vec![Point { x: 1.0, y: 2.0 }, Point { x: 3.0, y: 4.0 }],
//! };
//!
//! let doc = encode(&line).unwrap();
//! let root = doc.child("Line").unwrap();
//! assert_eq!(root.attribute("name"), Some("L1"));
//! assert_eq!(root.children_with_key("Point").count(), 2);
//!
//! let back: Line = decode(&doc).unwrap();
//! assert_eq!(back, line);
//! ```
//!
//! ### Reading and Writing XML
//!
//! ```rust
//! use intros_tree::{from_str, intros_type, to_string};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Header {
//!     rev_major: u16,
//!     rev_minor: u16,
//!     name: String,
//! }
//!
//! intros_type! {
//!     Header = "header" {
//!         rev_major: attribute "revMajor",
//!         rev_minor: attribute "revMinor",
//!         name: attribute "name",
//!     }
//! }
//!
//! let xml = r#"<header revMajor="1" revMinor="4" name="Town01"/>"#;
//! let header: Header = from_str(xml).unwrap();
//! assert_eq!(header.rev_minor, 4);
//! assert_eq!(to_string(&header).unwrap(), xml);
//! ```
//!
//! ### Building Documents with node! Macro
//!
//! ```rust
//! use intros_tree::node;
//!
//! let doc = node!({
//!     "Entities" => {
//!         "ScenarioObject" => { @"name" = "Ego" },
//!         "ScenarioObject" => { @"name" = "Target" },
//!     },
//! });
//!
//! let names: Vec<_> = doc
//!     .child("Entities")
//!     .unwrap()
//!     .children_with_key("ScenarioObject")
//!     .filter_map(|o| o.attribute("name"))
//!     .collect();
//! assert_eq!(names, vec!["Ego", "Target"]);
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Registration**: once per type per process; descriptors are cached and shared by all threads
//! - **Encoding / Decoding**: O(n) in the number of fields and elements, no per-call reflection
//! - **XML**: single-pass reader and writer
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Proper error propagation with `Result` types
//! - A failed decode never returns a partially filled value
//!
//! ## Mapping Rules
//!
//! See the [`format`] module for the complete mapping between types, paths and documents.
//!
//! ## Examples
//!
//! See the `demos/` directory for runnable examples:
//!
//! - **`simple.rs`** - Describe two types, encode, decode
//! - **`macro.rs`** - Declaring types with `intros_type!` and building trees with `node!`
//! - **`collections.rs`** - Repeated elements, scalar lists, shared intermediate nodes
//! - **`dynamic_documents.rs`** - Working with `Node` trees directly
//! - **`custom_options.rs`** - Controlling the XML output
//! - **`scenario.rs`** - A small OpenSCENARIO-like document end to end
//!
//! Run any example with: `cargo run --example <name>`

pub mod attributes;
pub mod category;
pub mod decode;
pub mod descriptor;
pub mod document;
pub mod encode;
pub mod error;
pub mod format;
pub mod macros;
pub mod options;
pub mod path;
pub mod registry;
pub mod scalar;
pub mod xml_reader;
pub mod xml_writer;

pub use attributes::Attributes;
pub use category::{Category, Element, Member};
pub use decode::{decode, decode_with_report, Coercion, DecodeReport, Location};
pub use descriptor::{Accessor, FieldDescriptor, Introspect, TypeDescriptor, TypeDescriptorBuilder};
pub use document::{Document, Node};
pub use encode::encode;
pub use error::{Error, RegistrationError, Result};
pub use options::{IndentChar, XmlOptions};
pub use path::{FieldPath, Leaf, TEXT_SEGMENT};
pub use registry::register;
pub use scalar::Scalar;
pub use xml_reader::XmlReader;
pub use xml_writer::XmlWriter;

use std::io;

/// Renders a document as XML text.
///
/// # Examples
///
/// ```rust
/// use intros_tree::{node, to_xml_string, XmlOptions};
///
/// let doc = node!({ "Point" => { @"x" = "1.0" } });
/// assert_eq!(to_xml_string(&doc, &XmlOptions::new()), "<Point x=\"1.0\"/>");
/// ```
#[must_use]
pub fn to_xml_string(doc: &Node, options: &XmlOptions) -> String {
    let mut writer = XmlWriter::new(options.clone());
    writer.write_document(doc);
    writer.into_inner()
}

/// Parses XML text into a document.
///
/// # Examples
///
/// ```rust
/// use intros_tree::from_xml_str;
///
/// let doc = from_xml_str("<Point x=\"1.0\"/>").unwrap();
/// assert_eq!(doc.child("Point").and_then(|p| p.attribute("x")), Some("1.0"));
/// ```
///
/// # Errors
///
/// Returns an error with line and column information if the text is not well formed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_xml_str(input: &str) -> Result<Node> {
    XmlReader::new(input).read_document()
}

/// Encodes `value` as a single line of XML.
///
/// # Examples
///
/// ```rust
/// use intros_tree::{intros_type, to_string};
///
/// #[derive(Default)]
/// struct Point { x: i32, y: i32 }
///
/// intros_type! {
///     Point = "Point" { x: attribute "x", y: attribute "y" }
/// }
///
/// let xml = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(xml, "<Point x=\"1\" y=\"2\"/>");
/// ```
///
/// # Errors
///
/// Returns an error if the type cannot be registered.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T: Introspect>(value: &T) -> Result<String> {
    to_string_with_options(value, XmlOptions::default())
}

/// Encodes `value` as indented XML with a declaration, one element per line.
///
/// # Errors
///
/// Returns an error if the type cannot be registered.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T: Introspect>(value: &T) -> Result<String> {
    to_string_with_options(value, XmlOptions::pretty())
}

/// Encodes `value` as XML with custom options.
///
/// # Examples
///
/// ```rust
/// use intros_tree::{intros_type, to_string_with_options, XmlOptions};
///
/// #[derive(Default)]
/// struct Point { x: i32, y: i32 }
///
/// intros_type! {
///     Point = "Point" { x: attribute "x", y: attribute "y" }
/// }
///
/// let options = XmlOptions::new().with_declaration(true);
/// let xml = to_string_with_options(&Point { x: 1, y: 2 }, options).unwrap();
/// assert!(xml.starts_with("<?xml"));
/// ```
///
/// # Errors
///
/// Returns an error if the type cannot be registered.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T: Introspect>(value: &T, options: XmlOptions) -> Result<String> {
    let doc = encode(value)?;
    Ok(to_xml_string(&doc, &options))
}

/// Encodes `value` as indented XML into a writer.
///
/// # Examples
///
/// ```rust
/// use intros_tree::{intros_type, to_writer};
///
/// #[derive(Default)]
/// struct Point { x: i32, y: i32 }
///
/// intros_type! {
///     Point = "Point" { x: attribute "x", y: attribute "y" }
/// }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert!(!buffer.is_empty());
/// ```
///
/// # Errors
///
/// Returns an error if the type cannot be registered or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: Introspect,
{
    to_writer_with_options(writer, value, XmlOptions::pretty())
}

/// Encodes `value` as XML into a writer with custom options.
///
/// # Errors
///
/// Returns an error if the type cannot be registered or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: XmlOptions) -> Result<()>
where
    W: io::Write,
    T: Introspect,
{
    let xml = to_string_with_options(value, options)?;
    writer
        .write_all(xml.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Decodes a `T` from XML text.
///
/// # Examples
///
/// ```rust
/// use intros_tree::{from_str, intros_type};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// intros_type! {
///     Point = "Point" { x: attribute "x", y: attribute "y" }
/// }
///
/// let point: Point = from_str("<Point x=\"1\" y=\"2\"/>").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the text is not well formed XML or does not decode as a `T`.
/// Syntax errors include line and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T: Introspect>(s: &str) -> Result<T> {
    decode(&from_xml_str(s)?)
}

/// Decodes a `T` from an I/O stream of XML.
///
/// # Errors
///
/// Returns an error if reading fails, the input is not well formed XML, or it does not decode as
/// a `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: Introspect,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Decodes a `T` from bytes of XML text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not well formed XML, or do not decode as a
/// `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T: Introspect>(v: &[u8]) -> Result<T> {
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intros_type;
    use std::io::Cursor;

    #[derive(Debug, Default, PartialEq)]
    struct Point {
        x: f64,
        y: f64,
    }

    #[derive(Debug, Default, PartialEq)]
    struct Line {
        name: String,
        points: Vec<Point>,
    }

    intros_type! {
        Point = "Point" {
            x: attribute "x",
            y: attribute "y",
        }

        Line = "Line" {
            name: attribute "name",
            points: element "Point",
        }
    }

    fn sample() -> Line {
        Line {
            name: "L1".to_string(),
            points: vec![Point { x: 1.0, y: 2.0 }, Point { x: 3.0, y: 4.0 }],
        }
    }

    #[test]
    fn test_compact_xml() {
        let xml = to_string(&sample()).unwrap();
        assert_eq!(
            xml,
            "<Line name=\"L1\"><Point x=\"1.0\" y=\"2.0\"/><Point x=\"3.0\" y=\"4.0\"/></Line>"
        );
        assert_eq!(from_str::<Line>(&xml).unwrap(), sample());
    }

    #[test]
    fn test_pretty_roundtrip() {
        let xml = to_string_pretty(&sample()).unwrap();
        assert!(xml.contains("\n  <Point"));
        assert_eq!(from_str::<Line>(&xml).unwrap(), sample());
    }

    #[test]
    fn test_writer_and_reader() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &sample()).unwrap();

        let from_bytes: Line = from_slice(&buffer).unwrap();
        let from_stream: Line = from_reader(Cursor::new(buffer)).unwrap();
        assert_eq!(from_bytes, sample());
        assert_eq!(from_stream, sample());
    }

    #[test]
    fn test_invalid_utf8() {
        let err = from_slice::<Line>(&[0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, Error::Custom(_)));
    }
}
