//! Library facade for the `merge_demo` example so integration tests can reuse
//! the record types and helpers.

pub mod cli;
pub mod error;
pub mod person;
pub mod render;
