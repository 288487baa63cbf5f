//! Document Mapping Rules
//!
//! This module documents how described types are mapped onto document trees and how those
//! trees look as XML. It contains no code.
//!
//! # Overview
//!
//! A type is described once by a [`TypeDescriptor`](crate::TypeDescriptor): a node name and an
//! ordered list of fields. Each field has a dotted path and an attribute flag. The field's Rust
//! type decides its [`Category`](crate::Category), and the category decides the mapping.
//!
//! # Documents
//!
//! [`encode`](crate::encode) returns an unnamed document node whose only child is named after the
//! encoded type:
//!
//! ```text
//! <Line name="L1">
//!   <Point x="1.0" y="2.0"/>
//!   <Point x="3.0" y="4.0"/>
//! </Line>
//! ```
//!
//! [`decode`](crate::decode) looks the root up by the same name. A missing root is an error
//! ([`Error::RootMismatch`](crate::Error::RootMismatch)), never a default.
//!
//! # Paths
//!
//! | Path | Attribute flag | Slot |
//! |------|----------------|------|
//! | `x` | yes | attribute `x` of the node |
//! | `x` | no | text of child `x` |
//! | `#text` | no | text of the node itself |
//! | `a.b` | yes | attribute `b` of child `a` |
//! | `a.b` | no | text of child `b` of child `a` |
//! | `a.b.#text` | no | same slot as `a.b` |
//!
//! **Rules**:
//! - Segments are separated by `.` and must not be empty
//! - `#text` may only be the last segment, and only for non-attribute scalars
//! - Nested objects and collections always address child nodes; their attribute flag is ignored
//! - When writing, intermediate nodes are created on demand and shared between fields:
//!   `signlights.activePlan` (attribute) and `signlights.signlight` (collection) end up under one
//!   `signlights` node
//! - Two fields of one type may not address the same slot
//!
//! # Categories
//!
//! ## Scalars
//!
//! | Type | Text form | Example |
//! |------|-----------|---------|
//! | Integers | Decimal | `42`, `-7` |
//! | `f32`, `f64` | Fixed notation, shortest exact digits, always a fraction | `1.0`, `0.1`, `1000000.0` |
//! | Non-finite floats | | `NaN`, `inf`, `-inf` |
//! | `bool` | `true` / `false` (`1` / `0` also read) | `true` |
//! | `char` | The character | `x` |
//! | `String` | Verbatim | `Town 01` |
//! | `DateTime<Utc>` | RFC 3339, UTC | `2024-01-15T10:30:00Z` |
//! | `BigInt` | Decimal | `123456789012345678901234567890` |
//!
//! A missing slot decodes to the type's default (`0`, `0.0`, `false`, `""`). Text that does not
//! parse also decodes to the default and is listed in the [`DecodeReport`](crate::DecodeReport).
//!
//! ## Nested objects
//!
//! The nested value's fields fill one child node at the field path. The node is required when
//! decoding ([`Error::MissingNode`](crate::Error::MissingNode)) unless the nested type declares an
//! emptiness predicate with `omit_when`. Such a type is left out of the document when the
//! predicate holds, and decodes to its default when absent.
//!
//! ## Collections
//!
//! Each element becomes one child node at the field path, in iteration order:
//!
//! ```text
//! <routes>
//!   <route id="1"/>
//!   <route id="2"/>
//! </routes>
//! ```
//!
//! Scalar elements are written as the element node's text. An empty collection writes nothing,
//! not even intermediate nodes, and a missing node decodes to an empty collection.
//!
//! ## Rejected types
//!
//! Fixed-size arrays fail registration with
//! [`RegistrationError::UnsupportedArray`](crate::RegistrationError::UnsupportedArray). Types
//! that are neither scalars, described types, nor collections of those do not implement
//! [`Member`](crate::Member) and are rejected by the compiler.
//!
//! # XML Text
//!
//! [`to_xml_string`](crate::to_xml_string) and [`from_xml_str`](crate::from_xml_str) cover the part
//! of XML a document tree can express:
//!
//! - Elements, attributes, text, self-closing tags
//! - The five predefined entities and numeric character references
//! - CDATA sections (read only)
//! - The XML declaration, processing instructions, comments and DOCTYPE are skipped when reading
//!
//! A document read from XML has exactly one top-level node, the root element. Prefixed names
//! are kept as written and namespace declarations become `xmlns` attributes; no other namespace
//! processing or validation is done. Nesting deeper than
//! [`MAX_DEPTH`](crate::xml_reader::MAX_DEPTH) is a syntax error.
