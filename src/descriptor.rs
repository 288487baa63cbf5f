//! Field and type descriptors.
//!
//! A [`TypeDescriptor`] is the once-built metadata for one type: the node name it is written
//! under and its fields, in the order they are emitted. Each [`FieldDescriptor`] pairs a parsed
//! [`FieldPath`] with an [`Accessor`] into the owning value and the field type's
//! [`Category`].
//!
//! Descriptors are built inside [`Introspect::describe`] and registered once per process by
//! [`register`](crate::register).
//!
//! ## Examples
//!
//! ```rust
//! use intros_tree::{Introspect, RegistrationError, TypeDescriptor};
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
//! let descriptor = intros_tree::register::<Point>().unwrap();
//! assert_eq!(descriptor.node_name(), "Point");
//! assert_eq!(descriptor.fields().len(), 2);
//! ```

use crate::category::{Category, Member};
use crate::decode::DecodeReport;
use crate::error::RegistrationError;
use crate::path::SEPARATOR;
use crate::{FieldPath, Node, Result};
use std::any::type_name;
use std::collections::HashSet;
use std::fmt;

/// A type whose values can be encoded into and decoded from a document.
///
/// `describe` is called at most once per process, the first time the type is registered,
/// encoded, or decoded. Its result (success or failure) is cached for the process lifetime.
pub trait Introspect: Default + 'static {
    /// Builds the type's descriptor.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistrationError`] if a field type is unsupported, a path is malformed, or
    /// two fields occupy the same slot.
    fn describe() -> std::result::Result<TypeDescriptor<Self>, RegistrationError>;
}

/// Borrowing access to one field of `T`.
///
/// Both functions borrow from the value passed in and never retain it; a descriptor holds
/// accessors, not references to data.
pub struct Accessor<T, F> {
    get: fn(&T) -> &F,
    get_mut: fn(&mut T) -> &mut F,
}

impl<T, F> Accessor<T, F> {
    pub const fn new(get: fn(&T) -> &F, get_mut: fn(&mut T) -> &mut F) -> Self {
        Accessor { get, get_mut }
    }

    #[inline]
    pub fn get<'a>(&self, owner: &'a T) -> &'a F {
        (self.get)(owner)
    }

    #[inline]
    pub fn get_mut<'a>(&self, owner: &'a mut T) -> &'a mut F {
        (self.get_mut)(owner)
    }
}

impl<T, F> Clone for Accessor<T, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, F> Copy for Accessor<T, F> {}

/// The type-erased half of a field: runs the member strategy against the owning value.
trait Binding<T>: Send + Sync {
    fn encode(&self, owner: &T, node: &mut Node, path: &FieldPath) -> Result<()>;

    fn decode(
        &self,
        owner: &mut T,
        node: &Node,
        path: &FieldPath,
        report: &mut DecodeReport,
    ) -> Result<()>;
}

impl<T, F: Member> Binding<T> for Accessor<T, F> {
    fn encode(&self, owner: &T, node: &mut Node, path: &FieldPath) -> Result<()> {
        self.get(owner).encode_member(node, path)
    }

    fn decode(
        &self,
        owner: &mut T,
        node: &Node,
        path: &FieldPath,
        report: &mut DecodeReport,
    ) -> Result<()> {
        self.get_mut(owner).decode_member(node, path, report)
    }
}

/// Metadata for one field: where it lives in the document and how to reach it in the value.
pub struct FieldDescriptor<T> {
    path: FieldPath,
    category: Category,
    type_name: &'static str,
    binding: Box<dyn Binding<T>>,
    dependencies: fn() -> std::result::Result<(), RegistrationError>,
}

impl<T: 'static> FieldDescriptor<T> {
    /// Creates a field descriptor, classifying the field type.
    ///
    /// `is_attribute` only matters for scalar fields; nested objects and collections are always
    /// written as child nodes.
    ///
    /// # Errors
    ///
    /// Fails for array and unsupported field types and for paths that are malformed for the
    /// field's category.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intros_tree::{Accessor, Category, FieldDescriptor};
    ///
    /// #[derive(Default)]
    /// struct Sensor {
    ///     offsets: [f64; 3],
    ///     name: String,
    /// }
    ///
    /// let name = FieldDescriptor::new(
    ///     "name",
    ///     true,
    ///     Accessor::new(|s: &Sensor| &s.name, |s: &mut Sensor| &mut s.name),
    /// )
    /// .unwrap();
    /// assert_eq!(name.category(), Category::Scalar);
    ///
    /// let offsets = FieldDescriptor::new(
    ///     "offsets",
    ///     false,
    ///     Accessor::new(|s: &Sensor| &s.offsets, |s: &mut Sensor| &mut s.offsets),
    /// );
    /// assert!(offsets.is_err());
    /// ```
    pub fn new<F: Member>(
        path: &str,
        is_attribute: bool,
        accessor: Accessor<T, F>,
    ) -> std::result::Result<Self, RegistrationError> {
        let path = match F::CATEGORY {
            Category::Scalar => FieldPath::scalar(path, is_attribute)?,
            Category::NestedObject | Category::Collection => FieldPath::structural(path)?,
            Category::ArrayUnsupported => {
                return Err(RegistrationError::UnsupportedArray {
                    owner: type_name::<T>().to_string(),
                    path: path.to_string(),
                    type_name: type_name::<F>(),
                })
            }
            Category::Unsupported => {
                return Err(RegistrationError::Unsupported {
                    owner: type_name::<T>().to_string(),
                    path: path.to_string(),
                    type_name: type_name::<F>(),
                })
            }
        };

        Ok(FieldDescriptor {
            path,
            category: F::CATEGORY,
            type_name: type_name::<F>(),
            binding: Box::new(accessor),
            dependencies: F::register_dependencies,
        })
    }
}

impl<T> FieldDescriptor<T> {
    #[must_use]
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    #[must_use]
    pub fn is_attribute(&self) -> bool {
        self.path.is_attribute()
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// The Rust type name of the field.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn register_dependencies(&self) -> std::result::Result<(), RegistrationError> {
        (self.dependencies)()
    }

    pub(crate) fn encode(&self, owner: &T, node: &mut Node) -> Result<()> {
        self.binding.encode(owner, node, &self.path)
    }

    pub(crate) fn decode(&self, owner: &mut T, node: &Node, report: &mut DecodeReport) -> Result<()> {
        self.binding.decode(owner, node, &self.path, report)
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("path", &self.path.as_str())
            .field("is_attribute", &self.is_attribute())
            .field("category", &self.category)
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// The immutable description of one type: its node name and ordered fields.
pub struct TypeDescriptor<T> {
    node_name: String,
    fields: Vec<FieldDescriptor<T>>,
    omit_when: Option<fn(&T) -> bool>,
}

impl<T: 'static> TypeDescriptor<T> {
    /// Creates a descriptor from an ordered field list.
    ///
    /// # Errors
    ///
    /// Fails if the node name is empty or dotted, if two fields occupy the same slot, or if a
    /// nested object or collection sits on a node that another field walks through. Such a
    /// node would be written twice, once as the structural value and once as a shared
    /// intermediate, and the structural value would be lost on decode.
    pub fn new(
        node_name: impl Into<String>,
        fields: Vec<FieldDescriptor<T>>,
    ) -> std::result::Result<Self, RegistrationError> {
        let node_name = node_name.into();
        if node_name.is_empty() || node_name.contains(SEPARATOR) {
            return Err(RegistrationError::InvalidNodeName(node_name));
        }

        let mut slots = HashSet::with_capacity(fields.len());
        for field in &fields {
            let slot = field.path.slot_key();
            if !slots.insert(slot) {
                return Err(RegistrationError::DuplicateSlot {
                    owner: node_name,
                    slot: field.path.to_string(),
                });
            }
        }

        let intermediates: HashSet<String> = fields
            .iter()
            .flat_map(|field| field.path.intermediate_keys())
            .collect();
        let shadowed = fields.iter().find(|field| {
            matches!(field.category, Category::NestedObject | Category::Collection)
                && intermediates.contains(&field.path.slot_key())
        });
        if let Some(field) = shadowed {
            return Err(RegistrationError::DuplicateSlot {
                owner: node_name,
                slot: field.path.to_string(),
            });
        }

        Ok(TypeDescriptor {
            node_name,
            fields,
            omit_when: None,
        })
    }

    /// Starts building a descriptor field by field.
    pub fn builder(node_name: impl Into<String>) -> TypeDescriptorBuilder<T> {
        TypeDescriptorBuilder {
            node_name: node_name.into(),
            fields: Vec::new(),
            omit_when: None,
            error: None,
        }
    }

    /// Marks the type as optional when nested: values satisfying `predicate` are left out of the
    /// document, and a missing node decodes to the default value instead of failing.
    #[must_use]
    pub fn with_omit_when(mut self, predicate: fn(&T) -> bool) -> Self {
        self.omit_when = Some(predicate);
        self
    }
}

impl<T> TypeDescriptor<T> {
    #[must_use]
    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    /// The fields in declaration order, which is also the emitted order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    /// Returns `true` if the type declares an emptiness predicate.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.omit_when.is_some()
    }

    /// Returns `true` if `value` should be left out when nested in another object.
    #[must_use]
    pub fn is_omitted(&self, value: &T) -> bool {
        self.omit_when.map_or(false, |predicate| predicate(value))
    }
}

impl<T> fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("node_name", &self.node_name)
            .field("fields", &self.fields)
            .field("optional", &self.is_optional())
            .finish()
    }
}

/// Chainable construction of a [`TypeDescriptor`].
///
/// The first failing field is remembered and reported by [`build`](Self::build).
pub struct TypeDescriptorBuilder<T> {
    node_name: String,
    fields: Vec<FieldDescriptor<T>>,
    omit_when: Option<fn(&T) -> bool>,
    error: Option<RegistrationError>,
}

impl<T: 'static> TypeDescriptorBuilder<T> {
    /// Adds a field with an explicit attribute flag.
    #[must_use]
    pub fn field<F: Member>(mut self, path: &str, is_attribute: bool, accessor: Accessor<T, F>) -> Self {
        if self.error.is_none() {
            match FieldDescriptor::new(path, is_attribute, accessor) {
                Ok(field) => self.fields.push(field),
                Err(err) => self.error = Some(err),
            }
        }
        self
    }

    /// Adds a scalar field written as an attribute.
    #[must_use]
    pub fn attribute<F: Member>(self, path: &str, get: fn(&T) -> &F, get_mut: fn(&mut T) -> &mut F) -> Self {
        self.field(path, true, Accessor::new(get, get_mut))
    }

    /// Adds a field written as a child node (or as text, for a `#text` path).
    #[must_use]
    pub fn element<F: Member>(self, path: &str, get: fn(&T) -> &F, get_mut: fn(&mut T) -> &mut F) -> Self {
        self.field(path, false, Accessor::new(get, get_mut))
    }

    /// See [`TypeDescriptor::with_omit_when`].
    #[must_use]
    pub fn omit_when(mut self, predicate: fn(&T) -> bool) -> Self {
        self.omit_when = Some(predicate);
        self
    }

    /// Validates and returns the descriptor.
    ///
    /// # Errors
    ///
    /// Returns the first field error, or any error from [`TypeDescriptor::new`].
    pub fn build(self) -> std::result::Result<TypeDescriptor<T>, RegistrationError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let descriptor = TypeDescriptor::new(self.node_name, self.fields)?;
        Ok(match self.omit_when {
            Some(predicate) => descriptor.with_omit_when(predicate),
            None => descriptor,
        })
    }
}
