//! Fold failure carrying the partially merged destination.

use std::error::Error;
use std::fmt;

use super::MergeError;

/// A fold that stopped at its first error.
///
/// The destination is returned as it stood when the error occurred: some
/// operands, and some fields of the failing operand, may already have been
/// applied. Callers decide whether to keep or discard it.
pub struct MergeFailure<T> {
    partial: T,
    error: MergeError,
}

impl<T> MergeFailure<T> {
    pub(crate) const fn new(partial: T, error: MergeError) -> Self {
        Self { partial, error }
    }

    /// The destination as it stood when the fold stopped.
    #[must_use]
    pub const fn partial(&self) -> &T {
        &self.partial
    }

    /// The error that stopped the fold.
    #[must_use]
    pub const fn error(&self) -> &MergeError {
        &self.error
    }

    /// Split into the partial destination and the error.
    #[must_use]
    pub fn into_parts(self) -> (T, MergeError) {
        (self.partial, self.error)
    }

    /// Discard the partial destination.
    #[must_use]
    pub fn into_error(self) -> MergeError {
        self.error
    }
}

impl<T> From<MergeFailure<T>> for MergeError {
    fn from(failure: MergeFailure<T>) -> Self {
        failure.into_error()
    }
}

impl<T: fmt::Debug> fmt::Debug for MergeFailure<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeFailure")
            .field("partial", &self.partial)
            .field("error", &self.error)
            .finish()
    }
}

impl<T> fmt::Display for MergeFailure<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "merge aborted at {}", self.error.path())
    }
}

impl<T: fmt::Debug> Error for MergeFailure<T> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}
