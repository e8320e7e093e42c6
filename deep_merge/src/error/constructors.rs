//! Constructors and inspection helpers for `MergeError`.

use crate::path::FieldPath;
use crate::reflect::{Mergeable, Operand, TypeIdentity};

use super::{MergeError, NestedLocation};

impl MergeError {
    /// Construct a type mismatch between `destination` and `incoming`.
    #[must_use]
    pub fn type_mismatch(path: &FieldPath, destination: Operand, incoming: Operand) -> Self {
        Self::TypeMismatch {
            path: path.clone(),
            destination,
            incoming,
        }
    }

    /// Construct a type mismatch by describing both values.
    #[must_use]
    pub fn mismatched_values(
        path: &FieldPath,
        destination: &dyn Mergeable,
        incoming: &dyn Mergeable,
    ) -> Self {
        Self::type_mismatch(path, Operand::of(destination), Operand::of(incoming))
    }

    /// Wrap `source` with the position it was raised beneath.
    #[must_use]
    pub fn nested(location: NestedLocation, path: FieldPath, source: Self) -> Self {
        Self::Nested {
            location,
            path,
            source: Box::new(source),
        }
    }

    /// Construct a borrow conflict on the shared owner `owner`.
    #[must_use]
    pub fn borrow_conflict(path: &FieldPath, owner: TypeIdentity) -> Self {
        Self::BorrowConflict {
            path: path.clone(),
            owner,
        }
    }

    /// Construct a failure raised by a custom strategy handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use deep_merge::{FieldPath, MergeError};
    ///
    /// let err = MergeError::custom(&FieldPath::root().index(3), "negative totals are not allowed");
    /// assert_eq!(err.to_string(), "merge failed at [3]: negative totals are not allowed");
    /// ```
    #[must_use]
    pub fn custom(path: &FieldPath, message: impl Into<String>) -> Self {
        Self::Custom {
            path: path.clone(),
            message: message.into(),
        }
    }

    /// Path of the node this error was raised or wrapped at.
    #[must_use]
    pub const fn path(&self) -> &FieldPath {
        match self {
            Self::TypeMismatch { path, .. }
            | Self::FieldCountMismatch { path, .. }
            | Self::FixedLengthMismatch { path, .. }
            | Self::Nested { path, .. }
            | Self::BorrowConflict { path, .. }
            | Self::Custom { path, .. } => path,
        }
    }

    /// The innermost error beneath any [`MergeError::Nested`] wrappers.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Self::Nested { source, .. } = current {
            current = &**source;
        }
        current
    }
}
