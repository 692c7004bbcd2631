//! Uniform, read-only traversal over typed values.
//!
//! [`Structural`] is the capability set the merge engine, the named-key set
//! and the equality helpers use to look inside a value without knowing its
//! concrete type. Records get an implementation from
//! `#[derive(Mergeable)]`; the standard containers and scalars are covered in
//! [`impls`].

use std::any::Any;

mod impls;

/// Structural category of a value.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Kind {
    /// A struct with named fields.
    Record,
    /// A key-unique mapping.
    Mapping,
    /// An ordered sequence.
    Sequence,
    /// A nilable reference such as `Option<T>`.
    Optional,
    /// A boxed value whose concrete type is only known at run time.
    Polymorphic,
    /// A node that may be referenced from several places in one graph.
    Shared,
    /// A leaf value.
    Scalar,
}

impl Kind {
    /// Returns `true` for kinds the merge engine descends into.
    #[must_use]
    pub const fn is_composite(self) -> bool {
        !matches!(self, Self::Scalar)
    }
}

/// A named, visible field of a record.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    name: &'static str,
    value: &'a dyn Structural,
    is_key: bool,
}

impl<'a> Field<'a> {
    /// Describe a field.
    #[must_use]
    pub fn new(name: &'static str, value: &'a dyn Structural) -> Self {
        Self {
            name,
            value,
            is_key: false,
        }
    }

    /// Mark this field as the record's name key.
    #[must_use]
    pub const fn key(mut self) -> Self {
        self.is_key = true;
        self
    }

    /// Field name as declared.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The field's value.
    #[must_use]
    pub fn value(&self) -> &'a dyn Structural {
        self.value
    }

    /// Whether the field supplies the record's name for keyed sets.
    #[must_use]
    pub const fn is_key(&self) -> bool {
        self.is_key
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.value.kind())
            .field("is_key", &self.is_key)
            .finish()
    }
}

/// Borrowed view of a leaf value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar<'a> {
    /// A boolean.
    Bool(bool),
    /// A signed integer, widened.
    Int(i128),
    /// An unsigned integer, widened.
    UInt(u128),
    /// A floating point number, widened.
    Float(f64),
    /// A single character.
    Char(char),
    /// A string slice.
    Str(&'a str),
}

/// Read-only structural access to a value.
///
/// Only the accessors matching [`Structural::kind`] return anything; the rest
/// keep their empty defaults.
pub trait Structural: Any {
    /// Structural category of the value.
    fn kind(&self) -> Kind;

    /// Whether the value equals the zero value of its type.
    fn is_empty_value(&self) -> bool;

    /// Concrete type name, used in error messages.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Visible fields of a record, in declaration order.
    fn fields(&self) -> Vec<Field<'_>> {
        Vec::new()
    }

    /// Entries of a mapping, keyed by their rendered key.
    fn entries(&self) -> Vec<(String, &dyn Structural)> {
        Vec::new()
    }

    /// Elements of a sequence, in order.
    fn elements(&self) -> Vec<&dyn Structural> {
        Vec::new()
    }

    /// The wrapped value of an optional or polymorphic reference.
    fn target(&self) -> Option<&dyn Structural> {
        None
    }

    /// The leaf value of a scalar.
    fn scalar(&self) -> Option<Scalar<'_>> {
        None
    }

    /// Stable identity of a shared node.
    fn node_id(&self) -> Option<crate::NodeId> {
        None
    }

    /// Equality for records without visible fields, which cannot be compared
    /// field by field.
    fn opaque_eq(&self, _other: &dyn Structural) -> bool {
        false
    }
}

/// Follow optional and polymorphic wrappers down to the first value that is
/// neither.
///
/// Returns `None` when a wrapper is absent.
#[must_use]
pub fn resolve(mut value: &dyn Structural) -> Option<&dyn Structural> {
    while matches!(value.kind(), Kind::Optional | Kind::Polymorphic) {
        value = value.target()?;
    }
    Some(value)
}

#[cfg(test)]
mod tests;
