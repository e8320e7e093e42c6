//! The recursive merge engine.
//!
//! [`MergeEngine::deep_merge`] is the single recursion point. At every node
//! it skips empty sources, reconciles the two types (allowing one reference
//! unwrap on either side), consults the cycle guard for shared owners and
//! hands the node to the strategy registered for the destination's kind.

use tracing::{debug, trace};

use crate::error::{MergeError, MergeResult};
use crate::options::MergeOptions;
use crate::path::FieldPath;
use crate::reflect::{
    Compatibility, Kind, Mergeable, Operand, Shape, ShapeMut, compatibility, shared_identity,
};
use crate::strategy::StrategyTable;
use crate::visited::VisitedSet;

/// A configured merge engine.
///
/// Engines are immutable after construction and cheap to clone; the strategy
/// table is shared between clones.
#[derive(Clone, Debug, Default)]
pub struct MergeEngine {
    strategies: StrategyTable,
}

impl MergeEngine {
    /// Build an engine whose strategy table applies `options` over the
    /// built-in handlers.
    #[must_use]
    pub fn new(options: MergeOptions) -> Self {
        let mut strategies = StrategyTable::default();
        for (kind, handler) in options.into_overrides() {
            debug!(%kind, "overriding merge strategy");
            strategies.replace(kind, handler);
        }
        Self { strategies }
    }

    /// The strategy table in use.
    #[must_use]
    pub const fn strategies(&self) -> &StrategyTable {
        &self.strategies
    }

    /// Merge `source` into `destination`.
    ///
    /// This is the entry point strategies use to recurse into nested values.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::TypeMismatch`] when the two values cannot be
    /// reconciled, or whatever the dispatched strategy reports.
    pub fn deep_merge(
        &self,
        destination: &mut dyn Mergeable,
        source: &dyn Mergeable,
        visited: &mut VisitedSet,
        path: &FieldPath,
    ) -> MergeResult<()> {
        if source.is_zero() {
            trace!(%path, "skipping empty source");
            return Ok(());
        }
        match compatibility(destination, source) {
            Compatibility::Same => self.merge_resolved(destination, source, visited, path),
            Compatibility::UnwrapSource => {
                let Shape::Reference(reference) = source.shape() else {
                    return Err(MergeError::mismatched_values(path, destination, source));
                };
                let Some(target) = reference
                    .referent()
                    .map_err(|_| MergeError::borrow_conflict(path, source.type_identity()))?
                else {
                    return Ok(());
                };
                self.merge_resolved(destination, &**target, visited, path)
            }
            Compatibility::UnwrapDestination => {
                if shared_identity(source).is_some_and(|handle| visited.seen(handle)) {
                    trace!(%path, "record already merged in this call");
                    return Ok(());
                }
                let expected = Operand::of(destination);
                let ShapeMut::Reference(reference) = destination.shape_mut() else {
                    return Err(MergeError::type_mismatch(path, expected, Operand::of(source)));
                };
                let mut target = reference
                    .referent_mut()
                    .map_err(|_| MergeError::borrow_conflict(path, expected.type_identity))?;
                self.merge_resolved(&mut **target, source, visited, path)
            }
            Compatibility::Mismatch => {
                Err(MergeError::mismatched_values(path, destination, source))
            }
        }
    }

    /// Merge two values of the same type, resolving a shared source owner
    /// through the cycle guard before dispatch.
    ///
    /// The guard looks through `Option`/`Box` layers to the first shared
    /// owner, so a revisited owner leaves an absent destination absent. A
    /// destination that already holds the source's owner is left alone.
    fn merge_resolved(
        &self,
        destination: &mut dyn Mergeable,
        source: &dyn Mergeable,
        visited: &mut VisitedSet,
        path: &FieldPath,
    ) -> MergeResult<()> {
        let kind = destination.kind();
        let Shape::Reference(reference) = source.shape() else {
            return self.dispatch(kind, destination, source, visited, path);
        };
        if let Some(handle) = shared_identity(source) {
            if visited.seen(handle) {
                trace!(%path, "record already merged in this call");
                return Ok(());
            }
            if shared_identity(destination) == Some(handle) {
                trace!(%path, "destination already shares the source owner");
                return Ok(());
            }
        }
        let identity = reference.identity();
        let Some(target) = reference
            .referent()
            .map_err(|_| MergeError::borrow_conflict(path, source.type_identity()))?
        else {
            return Ok(());
        };
        if let Some(handle) = identity
            && target.kind() == Kind::Record
        {
            visited.mark(handle);
        }
        self.dispatch(kind, destination, &**target, visited, path)
    }

    /// Run the strategy registered for `kind`.
    ///
    /// # Errors
    ///
    /// Propagates the strategy's error.
    pub fn dispatch(
        &self,
        kind: Kind,
        destination: &mut dyn Mergeable,
        source: &dyn Mergeable,
        visited: &mut VisitedSet,
        path: &FieldPath,
    ) -> MergeResult<()> {
        let handler = self.strategies.get(kind);
        handler(self, destination, source, visited, path)
    }

    /// Merge `source` into `destination` with a fresh cycle guard.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while merging.
    pub fn merge_into<T: Mergeable>(&self, destination: &mut T, source: &T) -> MergeResult<()> {
        let mut visited = VisitedSet::new();
        self.deep_merge(destination, source, &mut visited, &FieldPath::root())
    }
}
