//! The public fold over operands.
//!
//! [`Merger::merge`] folds its operands left to right: the first operand
//! seeds the result and every later operand is deep-merged into it, so later
//! operands win wherever they are not empty.

use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::engine::MergeEngine;
use crate::error::{MergeFailure, MergeResult};
use crate::options::MergeOptions;
use crate::path::FieldPath;
use crate::reflect::Mergeable;
use crate::visited::VisitedSet;

/// A typed entry point bound to one engine.
///
/// ```rust
/// use deep_merge::Merger;
///
/// let merger = Merger::<Vec<u8>>::new();
/// let merged = merger.merge([vec![1, 2, 3], vec![], vec![7]]).expect("vectors merge");
/// assert_eq!(merged, vec![7, 2, 3]);
/// ```
pub struct Merger<T> {
    engine: MergeEngine,
    marker: PhantomData<fn() -> T>,
}

impl<T: Mergeable + Default> Merger<T> {
    /// A merger using the built-in strategies.
    #[must_use]
    pub fn new() -> Self {
        Self::from_engine(MergeEngine::default())
    }

    /// A merger whose engine applies `options`.
    #[must_use]
    pub fn with_options(options: MergeOptions) -> Self {
        Self::from_engine(MergeEngine::new(options))
    }

    /// A merger driving an existing engine.
    #[must_use]
    pub const fn from_engine(engine: MergeEngine) -> Self {
        Self {
            engine,
            marker: PhantomData,
        }
    }

    /// The engine this merger drives.
    #[must_use]
    pub const fn engine(&self) -> &MergeEngine {
        &self.engine
    }

    /// Fold `operands` into one value.
    ///
    /// With no operands the result is `T::default()`; with one it is that
    /// operand unchanged. All operands stay alive until the fold finishes and
    /// share one cycle guard.
    ///
    /// # Errors
    ///
    /// Stops at the first failing operand and returns a [`MergeFailure`]
    /// holding the partially merged destination.
    pub fn merge<I>(&self, operands: I) -> Result<T, MergeFailure<T>>
    where
        I: IntoIterator<Item = T>,
    {
        let mut remaining = operands.into_iter();
        let Some(mut destination) = remaining.next() else {
            debug!("no operands; returning the default value");
            return Ok(T::default());
        };
        let sources: Vec<T> = remaining.collect();
        debug!(operands = sources.len() + 1, "merging operands");
        let mut visited = VisitedSet::new();
        let root = FieldPath::root();
        for source in &sources {
            if let Err(error) = self
                .engine
                .deep_merge(&mut destination, source, &mut visited, &root)
            {
                debug!(%error, "merge aborted");
                return Err(MergeFailure::new(destination, error));
            }
        }
        Ok(destination)
    }

    /// Merge `source` into `destination` in place.
    ///
    /// # Errors
    ///
    /// Returns the first error raised; `destination` keeps whatever was
    /// applied before it.
    pub fn merge_pair(&self, destination: &mut T, source: &T) -> MergeResult<()> {
        self.engine.merge_into(destination, source)
    }
}

impl<T: Mergeable + Default> Default for Merger<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Merger<T> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Merger<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Merger")
            .field("type", &std::any::type_name::<T>())
            .field("engine", &self.engine)
            .finish()
    }
}

/// Merge `source` into `destination` with the built-in strategies.
///
/// ```rust
/// let mut destination = Some(String::from("kept"));
/// deep_merge::merge(&mut destination, &None).expect("empty sources are skipped");
/// assert_eq!(destination.as_deref(), Some("kept"));
/// ```
///
/// # Errors
///
/// Returns the first error raised while merging.
pub fn merge<T: Mergeable>(destination: &mut T, source: &T) -> MergeResult<()> {
    MergeEngine::default().merge_into(destination, source)
}

/// Merge `source` into `destination` with an engine built from `options`.
///
/// # Errors
///
/// Returns the first error raised while merging.
pub fn merge_with<T: Mergeable>(
    destination: &mut T,
    source: &T,
    options: MergeOptions,
) -> MergeResult<()> {
    MergeEngine::new(options).merge_into(destination, source)
}

#[cfg(test)]
mod tests {
    //! Unit tests for the fold.

    use anyhow::{Result, ensure};
    use rstest::rstest;

    use super::*;
    use crate::error::MergeError;

    #[rstest]
    fn no_operands_yield_default() -> Result<()> {
        let merged = Merger::<Vec<u8>>::new().merge([])?;
        ensure!(merged.is_empty(), "expected an empty vector, got {merged:?}");
        Ok(())
    }

    #[rstest]
    fn single_operand_is_returned_unchanged() -> Result<()> {
        let merged = Merger::new().merge([String::from("only")])?;
        ensure!(merged == "only", "unexpected value {merged}");
        Ok(())
    }

    #[rstest]
    fn later_operands_win() -> Result<()> {
        let merged = Merger::new().merge([1_u8, 2, 0, 3])?;
        ensure!(merged == 3, "unexpected value {merged}");
        Ok(())
    }

    #[rstest]
    fn failure_keeps_partial_destination() {
        let merger = Merger::with_options(MergeOptions::new().scalar_handler(
            |_, destination, source, _, path| {
                if source.downcast_ref::<u8>() == Some(&9) {
                    return Err(MergeError::custom(path, "nine is reserved"));
                }
                if destination.overwrite_from(source) {
                    Ok(())
                } else {
                    Err(MergeError::mismatched_values(path, destination, source))
                }
            },
        ));
        let Err(failure) = merger.merge([1_u8, 2, 9, 4]) else {
            panic!("expected the fold to stop");
        };
        assert_eq!(*failure.partial(), 2);
        assert!(matches!(failure.error(), MergeError::Custom { .. }));
    }
}
