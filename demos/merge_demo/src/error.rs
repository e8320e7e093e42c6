//! Error types for the `merge_demo` example.

use thiserror::Error;

/// Errors raised by the merge demo.
#[derive(Debug, Error)]
pub enum DemoError {
    /// The operands could not be merged.
    #[error("failed to merge operands: {0}")]
    Merge(#[from] deep_merge::MergeError),
    /// The merged record could not be rendered as JSON.
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The merged record could not be rendered as TOML.
    #[error("failed to render TOML: {0}")]
    Toml(#[from] toml::ser::Error),
    /// Writing the rendered output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for demo results.
pub type Result<T> = std::result::Result<T, DemoError>;
