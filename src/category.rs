//! Capability classification of field types.
//!
//! Every field type falls into exactly one [`Category`], which decides how the field is mapped
//! onto the document:
//!
//! | Category | Types | Mapping |
//! |---|---|---|
//! | `NestedObject` | every [`Introspect`] type | one child node holding the object's fields |
//! | `Collection` | `Vec<E>`, `VecDeque<E>`, `LinkedList<E>` of [`Element`]s | one child node per element |
//! | `Scalar` | numbers, `bool`, `char`, `String`, dates, big integers, and [`scalar_member!`] types | an attribute, a child's text, or the node's own text |
//! | `ArrayUnsupported` | `[E; N]` | rejected at registration |
//! | `Unsupported` | anything else | does not implement [`Member`], so it does not compile |
//!
//! The category is an associated constant of [`Member`], so it is fixed at compile time and
//! copied into each [`FieldDescriptor`](crate::FieldDescriptor) when the owning type registers.
//! Collections classify their element type one level down through the [`Element`] bound: only
//! scalars and nested objects are elements, so a collection of collections is rejected by the
//! compiler.
//!
//! [`scalar_member!`]: crate::scalar_member

use crate::decode::{self, DecodeReport, Location};
use crate::encode;
use crate::error::RegistrationError;
use crate::{registry, FieldPath, Introspect, Node, Result};
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use std::collections::{LinkedList, VecDeque};
use std::fmt;

/// How a field type is bound to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    NestedObject,
    ArrayUnsupported,
    Scalar,
    Collection,
    Unsupported,
}

impl Category {
    /// Returns `true` for the categories a descriptor can hold.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        matches!(
            self,
            Category::NestedObject | Category::Scalar | Category::Collection
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::NestedObject => f.pad("nested object"),
            Category::ArrayUnsupported => f.pad("array"),
            Category::Scalar => f.pad("scalar"),
            Category::Collection => f.pad("collection"),
            Category::Unsupported => f.pad("unsupported"),
        }
    }
}

/// A type that can be bound to a field of a described type.
///
/// The methods dispatch to the encoder and decoder strategy matching [`Member::CATEGORY`].
pub trait Member: Sized + 'static {
    const CATEGORY: Category;

    /// Registers the descriptors this type depends on.
    ///
    /// Called once when the owning type registers, so that a broken nested type fails the
    /// registration of every type that contains it.
    fn register_dependencies() -> std::result::Result<(), RegistrationError> {
        Ok(())
    }

    /// Writes the value into `parent` at `path`.
    fn encode_member(&self, parent: &mut Node, path: &FieldPath) -> Result<()>;

    /// Replaces the value with the one found in `parent` at `path`.
    fn decode_member(
        &mut self,
        parent: &Node,
        path: &FieldPath,
        report: &mut DecodeReport,
    ) -> Result<()>;
}

/// A [`Member`] that can be repeated inside a collection.
pub trait Element: Member {
    /// Renders one element as a standalone node.
    fn encode_element(&self) -> Result<Node>;

    /// Reads one element from its node.
    fn decode_element(node: &Node, location: Location<'_>, report: &mut DecodeReport)
        -> Result<Self>;
}

impl<T: Introspect> Member for T {
    const CATEGORY: Category = Category::NestedObject;

    fn register_dependencies() -> std::result::Result<(), RegistrationError> {
        registry::ensure_registered::<T>()
    }

    fn encode_member(&self, parent: &mut Node, path: &FieldPath) -> Result<()> {
        encode::encode_nested(self, parent, path)
    }

    fn decode_member(
        &mut self,
        parent: &Node,
        path: &FieldPath,
        report: &mut DecodeReport,
    ) -> Result<()> {
        decode::decode_nested(self, parent, path, report)
    }
}

impl<T: Introspect> Element for T {
    fn encode_element(&self) -> Result<Node> {
        encode::encode_object(self)
    }

    fn decode_element(
        node: &Node,
        location: Location<'_>,
        report: &mut DecodeReport,
    ) -> Result<Self> {
        decode::decode_object(node, location, report)
    }
}

crate::scalar_member!(
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    bool,
    char,
    String,
    DateTime<Utc>,
    BigInt,
);

macro_rules! impl_collection_member {
    ($($container:ident),* $(,)?) => {
        $(
            impl<E: Element> Member for $container<E> {
                const CATEGORY: Category = Category::Collection;

                fn register_dependencies() -> std::result::Result<(), RegistrationError> {
                    E::register_dependencies()
                }

                fn encode_member(&self, parent: &mut Node, path: &FieldPath) -> Result<()> {
                    encode::encode_collection(self.iter(), parent, path)
                }

                fn decode_member(
                    &mut self,
                    parent: &Node,
                    path: &FieldPath,
                    report: &mut DecodeReport,
                ) -> Result<()> {
                    let elements = decode::decode_collection::<E>(parent, path, report)?;
                    self.clear();
                    self.extend(elements);
                    Ok(())
                }
            }
        )*
    };
}

impl_collection_member!(Vec, VecDeque, LinkedList);

/// Fixed-size arrays can be named in a descriptor but never registered.
impl<E: Member, const N: usize> Member for [E; N] {
    const CATEGORY: Category = Category::ArrayUnsupported;

    fn encode_member(&self, _parent: &mut Node, path: &FieldPath) -> Result<()> {
        Err(array_error::<Self>(path).into())
    }

    fn decode_member(
        &mut self,
        _parent: &Node,
        path: &FieldPath,
        _report: &mut DecodeReport,
    ) -> Result<()> {
        Err(array_error::<Self>(path).into())
    }
}

fn array_error<A>(path: &FieldPath) -> RegistrationError {
    RegistrationError::UnsupportedArray {
        owner: String::new(),
        path: path.as_str().to_string(),
        type_name: std::any::type_name::<A>(),
    }
}
