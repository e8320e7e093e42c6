//! The strategy table: one replaceable handler per structural kind.
//!
//! Every handler has the same signature. It receives the engine so nested
//! values can be merged through [`MergeEngine::deep_merge`], the destination
//! and source of the current node (already type-checked, with a source
//! reference already dereferenced once), the visited set shared by the whole
//! call, and the node's [`FieldPath`].
//!
//! The built-in handlers live in [`defaults`] and are public so an override
//! can fall back to them for the cases it does not handle itself.

pub mod defaults;

use std::fmt;
use std::sync::Arc;

use crate::engine::MergeEngine;
use crate::error::MergeResult;
use crate::path::FieldPath;
use crate::reflect::{Kind, Mergeable};
use crate::visited::VisitedSet;

/// A strategy handler.
pub type Handler = Arc<
    dyn Fn(
            &MergeEngine,
            &mut dyn Mergeable,
            &dyn Mergeable,
            &mut VisitedSet,
            &FieldPath,
        ) -> MergeResult<()>
        + Send
        + Sync,
>;

/// The six handler slots used by an engine.
///
/// Built with the [`defaults`] handlers; [`crate::MergeOptions`] replaces
/// individual slots before the engine is constructed. The table is not
/// modified afterwards.
#[derive(Clone)]
pub struct StrategyTable {
    reference: Handler,
    record: Handler,
    ordered_sequence: Handler,
    fixed_sequence: Handler,
    mapping: Handler,
    scalar: Handler,
    overridden: u8,
}

impl StrategyTable {
    /// Handler for values of `kind`.
    #[must_use]
    pub const fn get(&self, kind: Kind) -> &Handler {
        match kind {
            Kind::Reference => &self.reference,
            Kind::Record => &self.record,
            Kind::OrderedSequence => &self.ordered_sequence,
            Kind::FixedSequence => &self.fixed_sequence,
            Kind::Mapping => &self.mapping,
            Kind::Scalar => &self.scalar,
        }
    }

    /// Whether the slot for `kind` holds a caller-supplied handler.
    #[must_use]
    pub const fn is_overridden(&self, kind: Kind) -> bool {
        self.overridden & slot_bit(kind) != 0
    }

    pub(crate) fn replace(&mut self, kind: Kind, handler: Handler) {
        self.overridden |= slot_bit(kind);
        let slot = match kind {
            Kind::Reference => &mut self.reference,
            Kind::Record => &mut self.record,
            Kind::OrderedSequence => &mut self.ordered_sequence,
            Kind::FixedSequence => &mut self.fixed_sequence,
            Kind::Mapping => &mut self.mapping,
            Kind::Scalar => &mut self.scalar,
        };
        *slot = handler;
    }
}

const fn slot_bit(kind: Kind) -> u8 {
    match kind {
        Kind::Reference => 1,
        Kind::Record => 1 << 1,
        Kind::OrderedSequence => 1 << 2,
        Kind::FixedSequence => 1 << 3,
        Kind::Mapping => 1 << 4,
        Kind::Scalar => 1 << 5,
    }
}

impl Default for StrategyTable {
    fn default() -> Self {
        Self {
            reference: Arc::new(defaults::merge_reference),
            record: Arc::new(defaults::merge_record),
            ordered_sequence: Arc::new(defaults::merge_ordered_sequence),
            fixed_sequence: Arc::new(defaults::merge_fixed_sequence),
            mapping: Arc::new(defaults::merge_mapping),
            scalar: Arc::new(defaults::merge_scalar),
            overridden: 0,
        }
    }
}

impl fmt::Debug for StrategyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for kind in Kind::ALL {
            let origin = if self.is_overridden(kind) {
                "custom"
            } else {
                "built-in"
            };
            map.entry(&kind, &origin);
        }
        map.finish()
    }
}
