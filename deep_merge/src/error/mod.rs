//! Error types produced by the merge engine.

mod constructors;
mod failure;
mod types;

pub use failure::MergeFailure;
pub use types::{MergeError, NestedLocation};

/// Result alias used throughout the engine and strategy handlers.
pub type MergeResult<T> = Result<T, MergeError>;
