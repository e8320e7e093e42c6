//! Engine configuration.
//!
//! [`MergeOptions`] collects strategy overrides before an engine is built.
//! Each setter consumes and returns the options so calls chain:
//!
//! ```rust
//! use deep_merge::{MergeEngine, MergeOptions, Kind};
//!
//! let options = MergeOptions::new().scalar_handler(|_, _, _, _, _| Ok(()));
//! let engine = MergeEngine::new(options);
//! assert!(engine.strategies().is_overridden(Kind::Scalar));
//! assert!(!engine.strategies().is_overridden(Kind::Record));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::engine::MergeEngine;
use crate::error::MergeResult;
use crate::path::FieldPath;
use crate::reflect::{Kind, Mergeable};
use crate::strategy::Handler;
use crate::visited::VisitedSet;

/// Strategy overrides applied when an engine is constructed.
///
/// Kinds without an override keep the built-in handler. Setting the same
/// kind twice keeps the last handler.
#[derive(Clone, Default)]
pub struct MergeOptions {
    reference: Option<Handler>,
    record: Option<Handler>,
    ordered_sequence: Option<Handler>,
    fixed_sequence: Option<Handler>,
    mapping: Option<Handler>,
    scalar: Option<Handler>,
}

impl MergeOptions {
    /// Options with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the handler for `kind`.
    #[must_use]
    pub fn handler<F>(mut self, kind: Kind, handler: F) -> Self
    where
        F: Fn(&MergeEngine, &mut dyn Mergeable, &dyn Mergeable, &mut VisitedSet, &FieldPath) -> MergeResult<()>
            + Send
            + Sync
            + 'static,
    {
        *self.slot_mut(kind) = Some(Arc::new(handler));
        self
    }

    /// Replace the reference handler.
    #[must_use]
    pub fn reference_handler<F>(self, handler: F) -> Self
    where
        F: Fn(&MergeEngine, &mut dyn Mergeable, &dyn Mergeable, &mut VisitedSet, &FieldPath) -> MergeResult<()>
            + Send
            + Sync
            + 'static,
    {
        self.handler(Kind::Reference, handler)
    }

    /// Replace the record handler.
    #[must_use]
    pub fn record_handler<F>(self, handler: F) -> Self
    where
        F: Fn(&MergeEngine, &mut dyn Mergeable, &dyn Mergeable, &mut VisitedSet, &FieldPath) -> MergeResult<()>
            + Send
            + Sync
            + 'static,
    {
        self.handler(Kind::Record, handler)
    }

    /// Replace the ordered-sequence handler.
    #[must_use]
    pub fn ordered_sequence_handler<F>(self, handler: F) -> Self
    where
        F: Fn(&MergeEngine, &mut dyn Mergeable, &dyn Mergeable, &mut VisitedSet, &FieldPath) -> MergeResult<()>
            + Send
            + Sync
            + 'static,
    {
        self.handler(Kind::OrderedSequence, handler)
    }

    /// Replace the fixed-sequence handler.
    #[must_use]
    pub fn fixed_sequence_handler<F>(self, handler: F) -> Self
    where
        F: Fn(&MergeEngine, &mut dyn Mergeable, &dyn Mergeable, &mut VisitedSet, &FieldPath) -> MergeResult<()>
            + Send
            + Sync
            + 'static,
    {
        self.handler(Kind::FixedSequence, handler)
    }

    /// Replace the mapping handler.
    #[must_use]
    pub fn mapping_handler<F>(self, handler: F) -> Self
    where
        F: Fn(&MergeEngine, &mut dyn Mergeable, &dyn Mergeable, &mut VisitedSet, &FieldPath) -> MergeResult<()>
            + Send
            + Sync
            + 'static,
    {
        self.handler(Kind::Mapping, handler)
    }

    /// Replace the scalar handler.
    ///
    /// Scalars are everything that is not a reference, record, sequence or
    /// mapping, so this is the fallback for opaque values.
    #[must_use]
    pub fn scalar_handler<F>(self, handler: F) -> Self
    where
        F: Fn(&MergeEngine, &mut dyn Mergeable, &dyn Mergeable, &mut VisitedSet, &FieldPath) -> MergeResult<()>
            + Send
            + Sync
            + 'static,
    {
        self.handler(Kind::Scalar, handler)
    }

    /// Whether an override is set for `kind`.
    #[must_use]
    pub const fn overrides(&self, kind: Kind) -> bool {
        self.slot(kind).is_some()
    }

    /// Consume the options, yielding every override in strategy-table order.
    pub fn into_overrides(self) -> impl Iterator<Item = (Kind, Handler)> {
        let Self {
            reference,
            record,
            ordered_sequence,
            fixed_sequence,
            mapping,
            scalar,
        } = self;
        Kind::ALL
            .into_iter()
            .zip([
                reference,
                record,
                ordered_sequence,
                fixed_sequence,
                mapping,
                scalar,
            ])
            .filter_map(|(kind, handler)| handler.map(|set| (kind, set)))
    }

    const fn slot(&self, kind: Kind) -> Option<&Handler> {
        match kind {
            Kind::Reference => self.reference.as_ref(),
            Kind::Record => self.record.as_ref(),
            Kind::OrderedSequence => self.ordered_sequence.as_ref(),
            Kind::FixedSequence => self.fixed_sequence.as_ref(),
            Kind::Mapping => self.mapping.as_ref(),
            Kind::Scalar => self.scalar.as_ref(),
        }
    }

    const fn slot_mut(&mut self, kind: Kind) -> &mut Option<Handler> {
        match kind {
            Kind::Reference => &mut self.reference,
            Kind::Record => &mut self.record,
            Kind::OrderedSequence => &mut self.ordered_sequence,
            Kind::FixedSequence => &mut self.fixed_sequence,
            Kind::Mapping => &mut self.mapping,
            Kind::Scalar => &mut self.scalar,
        }
    }
}

impl fmt::Debug for MergeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let overridden: Vec<Kind> = Kind::ALL
            .into_iter()
            .filter(|kind| self.overrides(*kind))
            .collect();
        f.debug_struct("MergeOptions")
            .field("overridden", &overridden)
            .finish()
    }
}
