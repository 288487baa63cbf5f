//! Document to object decoding.
//!
//! Decoding starts from `T::default()` and overwrites each field from the document:
//!
//! - a scalar whose slot is absent keeps its type's default value;
//! - a scalar whose text does not parse also falls back to the default, and the coercion is
//!   recorded in the [`DecodeReport`];
//! - a nested object whose node is absent fails the decode with
//!   [`Error::MissingNode`](crate::Error::MissingNode), unless its type declares an emptiness
//!   predicate, in which case it decodes to its default;
//! - a collection is rebuilt from every sibling node at its path, in document order.
//!
//! A failing decode never hands back a partially filled value.

use crate::category::Element;
use crate::descriptor::{Introspect, TypeDescriptor};
use crate::scalar::Scalar;
use crate::{registry, Error, FieldPath, Node, Result};
use std::any::type_name;
use std::fmt;
use tracing::{debug, trace};

/// Where a value was read from, for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct Location<'a> {
    path: &'a FieldPath,
    index: Option<usize>,
}

impl<'a> Location<'a> {
    pub(crate) fn field(path: &'a FieldPath) -> Self {
        Location { path, index: None }
    }

    pub(crate) fn element(path: &'a FieldPath, index: usize) -> Self {
        Location {
            path,
            index: Some(index),
        }
    }

    #[must_use]
    pub fn path(&self) -> &'a FieldPath {
        self.path
    }

    /// Position inside a collection, if the value is a collection element.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.path, index),
            None => write!(f, "{}", self.path),
        }
    }
}

/// A scalar whose text could not be parsed and was replaced by its default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coercion {
    location: String,
    text: String,
    expected: &'static str,
}

impl Coercion {
    /// The field path (and collection index) of the value.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The text found in the document.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The Rust type the text was expected to parse as.
    #[must_use]
    pub fn expected(&self) -> &'static str {
        self.expected
    }
}

impl fmt::Display for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` at {} is not a valid {}, using the default",
            self.text, self.location, self.expected
        )
    }
}

/// The lenient scalar coercions performed during one decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    coercions: Vec<Coercion>,
    // Locations of the nested objects currently being read, outermost first.
    scope: Vec<String>,
}

impl DecodeReport {
    #[must_use]
    pub fn coercions(&self) -> &[Coercion] {
        &self.coercions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.coercions.len()
    }

    /// Returns `true` if every scalar present in the document parsed cleanly.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coercions.is_empty()
    }

    fn push(&mut self, coercion: Coercion) {
        self.coercions.push(coercion);
    }

    /// Runs `read` with `segment` appended to the location of every coercion it records.
    fn scoped<R>(&mut self, segment: String, read: impl FnOnce(&mut Self) -> R) -> R {
        self.scope.push(segment);
        let result = read(self);
        self.scope.pop();
        result
    }

    /// Full location of `location` from the decoded root, e.g. `Entities.Vehicle[1].@name`.
    fn qualify(&self, location: Location<'_>) -> String {
        let mut qualified = self.scope.join(".");
        if !qualified.is_empty() {
            qualified.push('.');
        }
        qualified.push_str(&location.to_string());
        qualified
    }
}

/// Decodes a `T` from a document.
///
/// The document must have a top-level node named by `T`'s descriptor.
///
/// # Errors
///
/// Fails if `T` cannot be registered, if the root node is missing, or if a required nested
/// object is missing.
///
/// # Examples
///
/// ```rust
/// use intros_tree::{decode, node, Introspect, RegistrationError, TypeDescriptor};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Weather {
///     cloud_state: String,
///     fog_range: f64,
/// }
///
/// impl Introspect for Weather {
///     fn describe() -> Result<TypeDescriptor<Self>, RegistrationError> {
///         TypeDescriptor::<Self>::builder("Weather")
///             .attribute("cloudState", |w| &w.cloud_state, |w| &mut w.cloud_state)
///             .attribute("Fog.visualRange", |w| &w.fog_range, |w| &mut w.fog_range)
///             .build()
///     }
/// }
///
/// let doc = node!({
///     "Weather" => {
///         @"cloudState" = "overcast",
///         "Fog" => { @"visualRange" = "120.0" },
///     },
/// });
///
/// let weather: Weather = decode(&doc).unwrap();
/// assert_eq!(weather.cloud_state, "overcast");
/// assert_eq!(weather.fog_range, 120.0);
/// ```
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode<T: Introspect>(doc: &Node) -> Result<T> {
    decode_with_report(doc).map(|(value, _)| value)
}

/// Same as [`decode`], also returning the scalar coercions that were applied.
///
/// # Errors
///
/// See [`decode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_with_report<T: Introspect>(doc: &Node) -> Result<(T, DecodeReport)> {
    let descriptor = registry::register::<T>()?;
    trace!(node = descriptor.node_name(), "decoding document");

    let root = doc
        .child(descriptor.node_name())
        .ok_or_else(|| Error::root_mismatch(descriptor.node_name(), doc.first_child_name()))?;

    let mut report = DecodeReport::default();
    let value = read_fields(descriptor, root, &mut report)?;
    Ok((value, report))
}

fn read_fields<T: Introspect>(
    descriptor: &TypeDescriptor<T>,
    node: &Node,
    report: &mut DecodeReport,
) -> Result<T> {
    let mut value = T::default();
    for field in descriptor.fields() {
        field.decode(&mut value, node, report)?;
    }
    Ok(value)
}

/// Decodes a collection element into a fresh `T`.
pub(crate) fn decode_object<T: Introspect>(
    node: &Node,
    location: Location<'_>,
    report: &mut DecodeReport,
) -> Result<T> {
    let descriptor = registry::register::<T>()?;
    report.scoped(location.to_string(), |report| read_fields(descriptor, node, report))
}

pub(crate) fn decode_nested<T: Introspect>(
    value: &mut T,
    parent: &Node,
    path: &FieldPath,
    report: &mut DecodeReport,
) -> Result<()> {
    let descriptor = registry::register::<T>()?;
    *value = match path.read_node(parent) {
        Some(node) => report.scoped(path.to_string(), |report| {
            read_fields(descriptor, node, report)
        })?,
        None if descriptor.is_optional() => T::default(),
        None => return Err(Error::missing_node(path.as_str(), descriptor.node_name())),
    };
    Ok(())
}

/// Reads every element at `path`. A missing intermediate chain yields no elements.
pub(crate) fn decode_collection<E: Element>(
    parent: &Node,
    path: &FieldPath,
    report: &mut DecodeReport,
) -> Result<Vec<E>> {
    path.read_nodes(parent)
        .enumerate()
        .map(|(index, node)| E::decode_element(node, Location::element(path, index), report))
        .collect()
}

#[doc(hidden)]
pub fn decode_scalar<S: Scalar + Default>(
    value: &mut S,
    parent: &Node,
    path: &FieldPath,
    report: &mut DecodeReport,
) -> Result<()> {
    *value = match path.read_text(parent) {
        Some(text) => parse_or_default(text, Location::field(path), report),
        None => S::default(),
    };
    Ok(())
}

#[doc(hidden)]
pub fn decode_scalar_element<S: Scalar + Default>(
    node: &Node,
    location: Location<'_>,
    report: &mut DecodeReport,
) -> Result<S> {
    Ok(match node.text() {
        Some(text) => parse_or_default(text, location, report),
        None => S::default(),
    })
}

fn parse_or_default<S: Scalar + Default>(
    text: &str,
    location: Location<'_>,
    report: &mut DecodeReport,
) -> S {
    S::from_text(text).unwrap_or_else(|| {
        let location = report.qualify(location);
        debug!(
            location = %location,
            text,
            expected = type_name::<S>(),
            "malformed scalar text, using default"
        );
        report.push(Coercion {
            location,
            text: text.to_string(),
            expected: type_name::<S>(),
        });
        S::default()
    })
}
