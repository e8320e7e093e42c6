//! Deep merging of arbitrarily nested values.
//!
//! `deep_merge` combines values of the same type field by field. Each value
//! describes its shape through the [`Mergeable`] trait; the
//! [`MergeEngine`] walks both operands together and dispatches every node to
//! the strategy registered for its [`Kind`]. Empty sources are skipped, so a
//! later operand overrides an earlier one only where it carries data.
//!
//! The derive macro for records lives in the companion `deep_merge_macros`
//! crate and is re-exported here.
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use deep_merge::{Mergeable, Merger};
//!
//! #[derive(Clone, Debug, Default, PartialEq, Mergeable)]
//! struct Settings {
//!     name: String,
//!     retries: u8,
//!     tags: BTreeMap<String, String>,
//! }
//!
//! let defaults = Settings {
//!     name: "service".into(),
//!     retries: 3,
//!     ..Settings::default()
//! };
//! let overrides = Settings {
//!     retries: 5,
//!     tags: BTreeMap::from([("env".into(), "prod".into())]),
//!     ..Settings::default()
//! };
//!
//! let merged = Merger::new().merge([defaults, overrides]).expect("settings merge");
//! assert_eq!(merged.name, "service");
//! assert_eq!(merged.retries, 5);
//! assert_eq!(merged.tags.len(), 1);
//! ```

extern crate self as deep_merge;

pub use deep_merge_macros::Mergeable;

mod engine;
mod error;
mod merger;
mod options;
mod path;
pub mod reflect;
pub mod strategy;
mod visited;

pub use engine::MergeEngine;
pub use error::{MergeError, MergeFailure, MergeResult, NestedLocation};
pub use merger::{Merger, merge, merge_with};
pub use options::MergeOptions;
pub use path::FieldPath;
pub use reflect::{
    FixedSequence, Identity, Kind, Mapping, Mergeable, OrderedSequence, Record, Reference,
    TypeIdentity,
};
pub use strategy::{Handler, StrategyTable};
pub use visited::VisitedSet;
