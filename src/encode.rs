//! Object to document encoding.
//!
//! [`encode`] wraps the value's fields in a single top-level node named after its type, so the
//! returned [`Node`] is a complete document. Nested objects are written the same way, except that
//! the node they fill is the one at their field path.
//!
//! ```rust
//! use intros_tree::{encode, Introspect, RegistrationError, TypeDescriptor};
//!
//! #[derive(Default)]
//! struct Header {
//!     rev_major: u16,
//!     name: String,
//! }
//!
//! impl Introspect for Header {
//!     fn describe() -> Result<TypeDescriptor<Self>, RegistrationError> {
//!         TypeDescriptor::<Self>::builder("header")
//!             .attribute("revMajor", |h| &h.rev_major, |h| &mut h.rev_major)
//!             .element("name.#text", |h| &h.name, |h| &mut h.name)
//!             .build()
//!     }
//! }
//!
//! let doc = encode(&Header { rev_major: 1, name: "Town01".into() }).unwrap();
//! let header = doc.child("header").unwrap();
//! assert_eq!(header.attribute("revMajor"), Some("1"));
//! assert_eq!(header.child("name").and_then(|n| n.text()), Some("Town01"));
//! ```

use crate::category::Element;
use crate::descriptor::{Introspect, TypeDescriptor};
use crate::scalar::Scalar;
use crate::{registry, FieldPath, Node, Result};
use tracing::trace;

/// Encodes `value` into a new document.
///
/// The document has exactly one top-level child, named by the type's descriptor.
///
/// # Errors
///
/// Fails only if `T`, or a type it nests, cannot be registered.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode<T: Introspect>(value: &T) -> Result<Node> {
    let descriptor = registry::register::<T>()?;
    trace!(node = descriptor.node_name(), "encoding document");

    let mut doc = Node::new();
    doc.push_child(descriptor.node_name(), write_fields(descriptor, value)?);
    Ok(doc)
}

fn write_fields<T>(descriptor: &TypeDescriptor<T>, value: &T) -> Result<Node> {
    let mut node = Node::new();
    for field in descriptor.fields() {
        field.encode(value, &mut node)?;
    }
    Ok(node)
}

/// Renders the fields of `value` into a standalone node.
pub(crate) fn encode_object<T: Introspect>(value: &T) -> Result<Node> {
    write_fields(registry::register::<T>()?, value)
}

/// Writes a nested object at `path`, unless its type reports it as empty.
pub(crate) fn encode_nested<T: Introspect>(
    value: &T,
    parent: &mut Node,
    path: &FieldPath,
) -> Result<()> {
    let descriptor = registry::register::<T>()?;
    if descriptor.is_omitted(value) {
        trace!(path = path.as_str(), "omitting empty nested object");
        return Ok(());
    }

    let node = write_fields(descriptor, value)?;
    path.append_node(parent, node);
    Ok(())
}

/// Writes one sibling node per element at `path`. An empty collection writes nothing.
pub(crate) fn encode_collection<'a, E, I>(elements: I, parent: &mut Node, path: &FieldPath) -> Result<()>
where
    E: Element + 'a,
    I: IntoIterator<Item = &'a E>,
{
    for element in elements {
        let node = element.encode_element()?;
        path.append_node(parent, node);
    }
    Ok(())
}

#[doc(hidden)]
pub fn encode_scalar<S: Scalar>(value: &S, parent: &mut Node, path: &FieldPath) -> Result<()> {
    path.write_text(parent, value.to_text());
    Ok(())
}

#[doc(hidden)]
pub fn encode_scalar_element<S: Scalar>(value: &S) -> Result<Node> {
    Ok(Node::with_text(value.to_text()))
}
