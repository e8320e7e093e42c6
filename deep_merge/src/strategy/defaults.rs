//! Built-in strategy handlers.
//!
//! Each function matches the [`super::Handler`] signature so it can be used
//! directly, or called from an override to delegate a case back to the
//! built-in behaviour.

use tracing::trace;

use crate::engine::MergeEngine;
use crate::error::{MergeError, MergeResult, NestedLocation};
use crate::path::FieldPath;
use crate::reflect::{Mergeable, Operand, Shape, ShapeMut};
use crate::visited::VisitedSet;

/// Merge into the target of a destination reference.
///
/// An absent destination target (`None`) is allocated with its default value
/// first and stays allocated even when the nested merge fails or has
/// nothing to copy. The source has already been dereferenced by the engine.
///
/// # Errors
///
/// Returns [`MergeError::BorrowConflict`] when the target of a shared owner
/// is already borrowed, or any error raised while merging the target.
pub fn merge_reference(
    engine: &MergeEngine,
    destination: &mut dyn Mergeable,
    source: &dyn Mergeable,
    visited: &mut VisitedSet,
    path: &FieldPath,
) -> MergeResult<()> {
    let expected = Operand::of(destination);
    let ShapeMut::Reference(reference) = destination.shape_mut() else {
        return Err(MergeError::type_mismatch(path, expected, Operand::of(source)));
    };
    let mut target = reference
        .referent_mut()
        .map_err(|_| MergeError::borrow_conflict(path, expected.type_identity))?;
    engine.deep_merge(&mut **target, source, visited, path)
}

/// Merge a record field by field.
///
/// Fields the destination marks as not settable are left alone. The first
/// failing field aborts the record.
///
/// # Errors
///
/// Returns [`MergeError::FieldCountMismatch`] when the records declare a
/// different number of fields, or [`MergeError::Nested`] wrapping the first
/// field failure.
pub fn merge_record(
    engine: &MergeEngine,
    destination: &mut dyn Mergeable,
    source: &dyn Mergeable,
    visited: &mut VisitedSet,
    path: &FieldPath,
) -> MergeResult<()> {
    let expected = Operand::of(destination);
    let (ShapeMut::Record(record), Shape::Record(incoming)) =
        (destination.shape_mut(), source.shape())
    else {
        return Err(MergeError::type_mismatch(path, expected, Operand::of(source)));
    };
    let field_count = record.field_count();
    if field_count != incoming.field_count() {
        return Err(MergeError::FieldCountMismatch {
            path: path.clone(),
            destination: field_count,
            incoming: incoming.field_count(),
        });
    }
    for index in 0..field_count {
        let name = record.field_name(index).unwrap_or_default();
        let (Some(field), Some(incoming_field)) = (record.field_mut(index), incoming.field(index))
        else {
            continue;
        };
        let field_path = path.field(name, index);
        engine
            .deep_merge(field, incoming_field, visited, &field_path)
            .map_err(|err| MergeError::nested(NestedLocation::Field, field_path, err))?;
    }
    Ok(())
}

/// Merge an ordered sequence element by element.
///
/// The destination grows to the source's length with default elements and
/// is never truncated; positions past the source's length are untouched.
///
/// # Errors
///
/// Returns [`MergeError::Nested`] wrapping the first element failure.
pub fn merge_ordered_sequence(
    engine: &MergeEngine,
    destination: &mut dyn Mergeable,
    source: &dyn Mergeable,
    visited: &mut VisitedSet,
    path: &FieldPath,
) -> MergeResult<()> {
    let expected = Operand::of(destination);
    let (ShapeMut::OrderedSequence(sequence), Shape::OrderedSequence(incoming)) =
        (destination.shape_mut(), source.shape())
    else {
        return Err(MergeError::type_mismatch(path, expected, Operand::of(source)));
    };
    let len = incoming.len();
    if sequence.len() < len {
        trace!(path = %path, from = sequence.len(), to = len, "growing ordered sequence");
        sequence.grow_to(len);
    }
    for index in 0..len {
        let (Some(slot), Some(element)) = (sequence.get_mut(index), incoming.get(index)) else {
            continue;
        };
        let element_path = path.index(index);
        engine
            .deep_merge(slot, element, visited, &element_path)
            .map_err(|err| MergeError::nested(NestedLocation::Element, element_path, err))?;
    }
    Ok(())
}

/// Merge a fixed sequence element by element.
///
/// # Errors
///
/// Returns [`MergeError::FixedLengthMismatch`] when the lengths differ, or
/// [`MergeError::Nested`] wrapping the first element failure.
pub fn merge_fixed_sequence(
    engine: &MergeEngine,
    destination: &mut dyn Mergeable,
    source: &dyn Mergeable,
    visited: &mut VisitedSet,
    path: &FieldPath,
) -> MergeResult<()> {
    let expected = Operand::of(destination);
    let (ShapeMut::FixedSequence(sequence), Shape::FixedSequence(incoming)) =
        (destination.shape_mut(), source.shape())
    else {
        return Err(MergeError::type_mismatch(path, expected, Operand::of(source)));
    };
    let len = incoming.len();
    if len != sequence.len() {
        return Err(MergeError::FixedLengthMismatch {
            path: path.clone(),
            destination: sequence.len(),
            incoming: len,
        });
    }
    for index in 0..len {
        let (Some(slot), Some(element)) = (sequence.get_mut(index), incoming.get(index)) else {
            continue;
        };
        let element_path = path.index(index);
        engine
            .deep_merge(slot, element, visited, &element_path)
            .map_err(|err| MergeError::nested(NestedLocation::Index, element_path, err))?;
    }
    Ok(())
}

/// Merge a mapping entry by entry.
///
/// Destination entries whose keys are absent from the source are kept.
/// Shared keys are merged recursively; new keys are merged into a default
/// value that is stored once the merge succeeds.
///
/// # Errors
///
/// Returns [`MergeError::TypeMismatch`] when the key types differ, or
/// [`MergeError::Nested`] wrapping the first entry failure.
pub fn merge_mapping(
    engine: &MergeEngine,
    destination: &mut dyn Mergeable,
    source: &dyn Mergeable,
    visited: &mut VisitedSet,
    path: &FieldPath,
) -> MergeResult<()> {
    let expected = Operand::of(destination);
    let found = Operand::of(source);
    let (ShapeMut::Mapping(mapping), Shape::Mapping(incoming)) =
        (destination.shape_mut(), source.shape())
    else {
        return Err(MergeError::type_mismatch(path, expected, found));
    };
    if mapping.key_type() != incoming.key_type() {
        return Err(MergeError::type_mismatch(path, expected, found));
    }
    if mapping.is_empty() {
        mapping.reserve(incoming.len());
    }
    for entry in incoming.entries() {
        let entry_path = path.key(&entry.label);
        let merged = mapping.merge_entry(entry.key, &mut |slot: &mut dyn Mergeable| {
            engine.deep_merge(slot, entry.value, visited, &entry_path)
        });
        match merged {
            Some(result) => {
                result.map_err(|err| MergeError::nested(NestedLocation::Key, entry_path, err))?;
            }
            None => return Err(MergeError::type_mismatch(path, expected, found)),
        }
    }
    Ok(())
}

/// Overwrite the destination with a copy of the source.
///
/// The engine only reaches this handler with a non-empty source, so a zero
/// value never replaces a populated destination.
///
/// # Errors
///
/// Returns [`MergeError::TypeMismatch`] when the source cannot be assigned to
/// the destination.
pub fn merge_scalar(
    _engine: &MergeEngine,
    destination: &mut dyn Mergeable,
    source: &dyn Mergeable,
    _visited: &mut VisitedSet,
    path: &FieldPath,
) -> MergeResult<()> {
    if destination.overwrite_from(source) {
        Ok(())
    } else {
        Err(MergeError::mismatched_values(path, destination, source))
    }
}
