//! Runtime shape introspection for mergeable values.
//!
//! Rust has no reflection facility that can walk arbitrary values, so every
//! type taking part in a merge describes itself through [`Mergeable`]. The
//! trait exposes the facts the engine needs at each recursion node: the
//! concrete type identity, whether the value is empty (equal to its type's
//! default), whether it is addressable, and a borrowed view tagged with its
//! structural [`Kind`].
//!
//! Implementations for standard library types live in the submodules;
//! records are described by `#[derive(Mergeable)]`.
//!
//! ```rust
//! use deep_merge::reflect::{Kind, classify, length};
//!
//! assert_eq!(classify(&vec![1_u8, 2]), Kind::OrderedSequence);
//! assert_eq!(classify(&Some(3_u8)), Kind::Reference);
//! assert_eq!(length(&[0_u16; 4]), Some(4));
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::ops::{Deref, DerefMut};

use thiserror::Error;

use crate::MergeResult;

mod mapping;
mod reference;
mod scalar;
mod sequence;

#[cfg(test)]
mod tests;

/// Structural kind of a value, selecting the strategy that merges it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Single-value indirection such as `Option<T>`, `Box<T>` or a shared owner.
    Reference,
    /// Fixed set of named (or positional) fields.
    Record,
    /// Variable-length, index-addressed collection.
    OrderedSequence,
    /// Fixed-length, index-addressed collection.
    FixedSequence,
    /// Unique keys mapped to values.
    Mapping,
    /// Anything else; merged by overwriting.
    Scalar,
}

impl Kind {
    /// Every kind, in strategy-table order.
    pub const ALL: [Self; 6] = [
        Self::Reference,
        Self::Record,
        Self::OrderedSequence,
        Self::FixedSequence,
        Self::Mapping,
        Self::Scalar,
    ];

    /// Lower-case label used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Record => "record",
            Self::OrderedSequence => "ordered sequence",
            Self::FixedSequence => "fixed sequence",
            Self::Mapping => "mapping",
            Self::Scalar => "scalar",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Concrete type identity of a value.
///
/// Equality compares [`TypeId`]s only; the name is kept for diagnostics.
#[derive(Clone, Copy, Debug)]
pub struct TypeIdentity {
    id: TypeId,
    name: &'static str,
}

impl TypeIdentity {
    /// Identity of `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying [`TypeId`].
    #[must_use]
    pub const fn id(self) -> TypeId {
        self.id
    }

    /// Fully qualified type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeIdentity {}

impl std::hash::Hash for TypeIdentity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Type identity and kind of one side of a merge node, captured for errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operand {
    /// Concrete type of the operand.
    pub type_identity: TypeIdentity,
    /// Structural kind of the operand.
    pub kind: Kind,
}

impl Operand {
    /// Describe `value`.
    #[must_use]
    pub fn of(value: &dyn Mergeable) -> Self {
        Self {
            type_identity: value.type_identity(),
            kind: value.kind(),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.type_identity, self.kind)
    }
}

/// Stable handle of an addressable value.
///
/// Handles are derived from the allocation of a shared owner (`Rc`, `Arc`),
/// which stays fixed for as long as any clone of the owner is alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Identity(usize);

impl Identity {
    /// Handle for the allocation behind `owner`.
    #[must_use]
    pub fn of_allocation<T: ?Sized>(owner: *const T) -> Self {
        Self(owner.cast::<()>().addr())
    }
}

/// A shared or exclusive borrow was refused because the referent is in use.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("referent is already borrowed")]
pub struct BorrowBusy;

/// Shared view of a reference's target, holding any borrow guard it needs.
pub type Referent<'a> = Box<dyn Deref<Target = dyn Mergeable> + 'a>;

/// Exclusive view of a reference's target, holding any borrow guard it needs.
pub type ReferentMut<'a> = Box<dyn DerefMut<Target = dyn Mergeable> + 'a>;

/// Accessors for [`Kind::Reference`] values.
pub trait Reference {
    /// Type of the value this reference points at.
    fn referent_type(&self) -> TypeIdentity;

    /// Borrow the target, or `None` when the reference is absent.
    ///
    /// # Errors
    ///
    /// Returns [`BorrowBusy`] when the target is exclusively borrowed.
    fn referent(&self) -> Result<Option<Referent<'_>>, BorrowBusy>;

    /// Borrow the target mutably, allocating a default target when absent.
    ///
    /// The allocation is kept whatever the caller does with the guard, so
    /// an absent reference ends up holding `T::default()` even if nothing is
    /// merged into it.
    ///
    /// # Errors
    ///
    /// Returns [`BorrowBusy`] when the target is already borrowed.
    fn referent_mut(&mut self) -> Result<ReferentMut<'_>, BorrowBusy>;

    /// Identity of the target when it lives behind a shared owner.
    fn identity(&self) -> Option<Identity> {
        None
    }
}

/// Accessors for [`Kind::Record`] values.
pub trait Record {
    /// Number of fields, settable or not.
    fn field_count(&self) -> usize;

    /// Declared name of the field at `index`.
    fn field_name(&self, index: usize) -> Option<&'static str>;

    /// Field at `index`.
    fn field(&self, index: usize) -> Option<&dyn Mergeable>;

    /// Field at `index`, or `None` when the field cannot be set.
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Mergeable>;
}

/// Accessors for [`Kind::OrderedSequence`] values.
pub trait OrderedSequence {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether the sequence holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`.
    fn get(&self, index: usize) -> Option<&dyn Mergeable>;

    /// Element at `index`, mutably.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Mergeable>;

    /// Extend with default elements until the sequence holds `len` elements.
    /// Never shrinks.
    fn grow_to(&mut self, len: usize);
}

/// Accessors for [`Kind::FixedSequence`] values.
pub trait FixedSequence {
    /// Declared length.
    fn len(&self) -> usize;

    /// Whether the declared length is zero.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`.
    fn get(&self, index: usize) -> Option<&dyn Mergeable>;

    /// Element at `index`, mutably.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Mergeable>;
}

/// One entry yielded by [`Mapping::entries`].
pub struct MapEntry<'a> {
    /// The key.
    pub key: &'a dyn Mergeable,
    /// Rendered key, used for field paths.
    pub label: String,
    /// The value stored under `key`.
    pub value: &'a dyn Mergeable,
}

/// Callback applied to a mapping slot by [`Mapping::merge_entry`].
pub type EntryMerge<'a> = &'a mut dyn FnMut(&mut dyn Mergeable) -> MergeResult<()>;

/// Accessors for [`Kind::Mapping`] values.
pub trait Mapping {
    /// Number of entries.
    fn len(&self) -> usize;

    /// Whether the mapping holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Type of the mapping's keys.
    fn key_type(&self) -> TypeIdentity;

    /// Iterate over every entry.
    fn entries(&self) -> Box<dyn Iterator<Item = MapEntry<'_>> + '_>;

    /// Capacity hint for `additional` upcoming entries.
    fn reserve(&mut self, additional: usize);

    /// Run `merge` on the value stored under `key`.
    ///
    /// When `key` is absent, `merge` runs on a fresh default value which is
    /// stored only if `merge` succeeds. Returns `None` without calling
    /// `merge` when `key` is not of this mapping's key type.
    fn merge_entry(&mut self, key: &dyn Mergeable, merge: EntryMerge<'_>)
    -> Option<MergeResult<()>>;
}

/// Borrowed view of a value, tagged with its kind.
pub enum Shape<'a> {
    /// See [`Reference`].
    Reference(&'a dyn Reference),
    /// See [`Record`].
    Record(&'a dyn Record),
    /// See [`OrderedSequence`].
    OrderedSequence(&'a dyn OrderedSequence),
    /// See [`FixedSequence`].
    FixedSequence(&'a dyn FixedSequence),
    /// See [`Mapping`].
    Mapping(&'a dyn Mapping),
    /// Opaque value; merged through [`Mergeable::overwrite_from`].
    Scalar,
}

impl Shape<'_> {
    /// Kind of the viewed value.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Reference(_) => Kind::Reference,
            Self::Record(_) => Kind::Record,
            Self::OrderedSequence(_) => Kind::OrderedSequence,
            Self::FixedSequence(_) => Kind::FixedSequence,
            Self::Mapping(_) => Kind::Mapping,
            Self::Scalar => Kind::Scalar,
        }
    }
}

/// Exclusive view of a value, tagged with its kind.
pub enum ShapeMut<'a> {
    /// See [`Reference`].
    Reference(&'a mut dyn Reference),
    /// See [`Record`].
    Record(&'a mut dyn Record),
    /// See [`OrderedSequence`].
    OrderedSequence(&'a mut dyn OrderedSequence),
    /// See [`FixedSequence`].
    FixedSequence(&'a mut dyn FixedSequence),
    /// See [`Mapping`].
    Mapping(&'a mut dyn Mapping),
    /// Opaque value; merged through [`Mergeable::overwrite_from`].
    Scalar,
}

/// A value the merge engine can inspect and update.
///
/// Most types get this from `#[derive(Mergeable)]` or from the built-in
/// implementations for scalars, `Option`, `Box`, shared owners, `Vec`,
/// arrays and maps.
pub trait Mergeable: Any {
    /// Concrete type of the value.
    fn type_identity(&self) -> TypeIdentity {
        TypeIdentity::of::<Self>()
    }

    /// Whether the value equals its type's zero value. Empty sources are
    /// skipped by the engine.
    fn is_zero(&self) -> bool;

    /// Shared view of the value.
    fn shape(&self) -> Shape<'_>;

    /// Exclusive view of the value.
    fn shape_mut(&mut self) -> ShapeMut<'_>;

    /// Replace `self` with a copy of `source`.
    ///
    /// Returns `false`, leaving `self` untouched, when `source` is of a
    /// different concrete type.
    fn overwrite_from(&mut self, source: &dyn Mergeable) -> bool;

    /// Structural kind of the value.
    fn kind(&self) -> Kind {
        self.shape().kind()
    }

    /// Stable handle when the value is addressable.
    fn identity(&self) -> Option<Identity> {
        match self.shape() {
            Shape::Reference(reference) => reference.identity(),
            _ => None,
        }
    }
}

impl dyn Mergeable {
    /// Whether the concrete type is `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    /// Downcast to `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Downcast to `T`, mutably.
    #[must_use]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }
}

impl fmt::Debug for dyn Mergeable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mergeable")
            .field("type", &self.type_identity().name())
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

/// Overwrite `destination` with a clone of `source` when the types agree.
///
/// This is the assignment primitive behind every built-in
/// [`Mergeable::overwrite_from`] and the derive's generated one.
pub fn overwrite_with_clone<T: Mergeable + Clone>(
    destination: &mut T,
    source: &dyn Mergeable,
) -> bool {
    let Some(value) = source.downcast_ref::<T>() else {
        return false;
    };
    destination.clone_from(value);
    true
}

/// Whether `value` equals `T::default()`.
#[must_use]
pub fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Structural kind of `value`.
#[must_use]
pub fn classify(value: &dyn Mergeable) -> Kind {
    value.kind()
}

/// Whether `value` has a stable identity usable for cycle detection.
#[must_use]
pub fn is_addressable(value: &dyn Mergeable) -> bool {
    value.identity().is_some()
}

/// Identity of the first shared owner reached by following references out
/// of `value`.
///
/// Shared owners report their identity without being borrowed, so this is
/// usable while their targets are in use. Absent targets yield `None`.
#[must_use]
pub fn shared_identity(value: &dyn Mergeable) -> Option<Identity> {
    let Shape::Reference(reference) = value.shape() else {
        return None;
    };
    if let Some(identity) = reference.identity() {
        return Some(identity);
    }
    let target = reference.referent().ok().flatten()?;
    shared_identity(&**target)
}

/// Length of a sequence or mapping; `None` for other kinds.
#[must_use]
pub fn length(value: &dyn Mergeable) -> Option<usize> {
    match value.shape() {
        Shape::OrderedSequence(sequence) => Some(sequence.len()),
        Shape::FixedSequence(sequence) => Some(sequence.len()),
        Shape::Mapping(mapping) => Some(mapping.len()),
        Shape::Reference(_) | Shape::Record(_) | Shape::Scalar => None,
    }
}

/// How a destination/source pair lines up before dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compatibility {
    /// Both sides have the same concrete type.
    Same,
    /// The source is a reference to the destination's type.
    UnwrapSource,
    /// The destination is a reference to the source's type.
    UnwrapDestination,
    /// Neither side can be reconciled with one unwrap.
    Mismatch,
}

/// Decide whether `destination` and `source` can be merged.
///
/// Types match directly, or after exactly one reference unwrap on either
/// side. The source side is tried first.
#[must_use]
pub fn compatibility(destination: &dyn Mergeable, source: &dyn Mergeable) -> Compatibility {
    let destination_type = destination.type_identity();
    let source_type = source.type_identity();
    if destination_type == source_type {
        return Compatibility::Same;
    }
    if let Shape::Reference(reference) = source.shape()
        && reference.referent_type() == destination_type
    {
        return Compatibility::UnwrapSource;
    }
    if let Shape::Reference(reference) = destination.shape()
        && reference.referent_type() == source_type
    {
        return Compatibility::UnwrapDestination;
    }
    Compatibility::Mismatch
}
