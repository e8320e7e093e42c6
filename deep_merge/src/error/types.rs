//! Primary error enum for merge failures.

use std::fmt;

use thiserror::Error;

use crate::path::FieldPath;
use crate::reflect::{Operand, TypeIdentity};

/// Container position at which a nested failure occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NestedLocation {
    /// A record field.
    Field,
    /// An element of an ordered sequence.
    Element,
    /// An element of a fixed sequence.
    Index,
    /// A mapping entry.
    Key,
}

impl fmt::Display for NestedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Field => "field",
            Self::Element => "sequence",
            Self::Index => "fixed sequence",
            Self::Key => "mapping",
        })
    }
}

/// Errors that abort a merge.
///
/// Every variant carries the [`FieldPath`] of the node that failed. None of
/// them are retryable: the first error stops the whole fold.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MergeError {
    /// Destination and source types differ even after one reference unwrap.
    #[error("types do not match at {path}: destination is {destination}, source is {incoming}")]
    TypeMismatch {
        /// Node that failed.
        path: FieldPath,
        /// Destination type and kind.
        destination: Operand,
        /// Source type and kind.
        incoming: Operand,
    },

    /// Record field counts differ.
    #[error(
        "number of fields do not match at {path}: destination has {destination}, source has {incoming}"
    )]
    FieldCountMismatch {
        /// Node that failed.
        path: FieldPath,
        /// Field count of the destination record.
        destination: usize,
        /// Field count of the source record.
        incoming: usize,
    },

    /// Fixed-sequence lengths differ.
    #[error(
        "fixed sequence lengths do not match at {path}: destination has {destination}, source has {incoming}"
    )]
    FixedLengthMismatch {
        /// Node that failed.
        path: FieldPath,
        /// Length of the destination.
        destination: usize,
        /// Length of the source.
        incoming: usize,
    },

    /// A failure inside a record field, sequence element or mapping entry.
    #[error("error in {location} at {path}: {source}")]
    Nested {
        /// Kind of container position.
        location: NestedLocation,
        /// Path of the field, element or entry.
        path: FieldPath,
        /// The failure raised beneath this position.
        #[source]
        source: Box<MergeError>,
    },

    /// A shared owner's target was already borrowed while merging.
    #[error("cannot borrow {owner} at {path}: its target is already in use by this merge")]
    BorrowConflict {
        /// Node that failed.
        path: FieldPath,
        /// Type of the shared owner.
        owner: TypeIdentity,
    },

    /// A failure reported by a caller-supplied strategy handler.
    #[error("merge failed at {path}: {message}")]
    Custom {
        /// Node that failed.
        path: FieldPath,
        /// Human-readable explanation.
        message: String,
    },
}
