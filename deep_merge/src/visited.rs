//! Cycle guard for a single merge call.
//!
//! Only addressable records take part: values behind a shared owner whose
//! target is a record. Plain fields, `Box`/`Option` targets, and elements
//! stored inline in sequences or mappings have no stable identity and are
//! never tracked, so a cycle that avoids shared owners is not guarded. Owned
//! Rust data cannot form such a cycle, but a custom [`crate::Reference`]
//! implementation that fabricates one will recurse until the stack runs out.
//!
//! The engine checks the set before the destination is touched. A source
//! such as `Option<Rc<RefCell<T>>>` is followed through its `Option` to the
//! owner, so a revisited owner leaves an absent destination slot absent
//! instead of allocating an empty target for it.

use std::collections::HashSet;

use crate::reflect::Identity;

/// Record identities already merged during the current call.
#[derive(Debug, Default)]
pub struct VisitedSet {
    seen: HashSet<Identity>,
}

impl VisitedSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `identity` has already been merged.
    #[must_use]
    pub fn seen(&self, identity: Identity) -> bool {
        self.seen.contains(&identity)
    }

    /// Record `identity` as merged. Returns `false` if it was already present.
    pub fn mark(&mut self, identity: Identity) -> bool {
        self.seen.insert(identity)
    }

    /// Number of identities recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
