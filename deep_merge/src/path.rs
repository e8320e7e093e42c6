//! Diagnostic locations of recursion nodes.

use std::fmt;

/// Location of a recursion node within the merged value's shape.
///
/// Paths grow by `.name(index)` for record fields, `[i]` for sequence
/// positions and `[key]` for mapping keys. They only feed error messages and
/// tracing output; the engine never branches on them.
///
/// ```rust
/// use deep_merge::FieldPath;
///
/// let path = FieldPath::root().field("address", 2).field("friends", 1).key("Tom");
/// assert_eq!(path.as_str(), ".address(2).friends(1)[Tom]");
/// assert_eq!(FieldPath::root().to_string(), "<root>");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    /// The path of the top-level value.
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Path of the record field `name`, declared at position `index`.
    #[must_use]
    pub fn field(&self, name: &str, index: usize) -> Self {
        Self(format!("{}.{name}({index})", self.0))
    }

    /// Path of the sequence element at `index`.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    /// Path of the mapping entry rendered as `label`.
    #[must_use]
    pub fn key(&self, label: &str) -> Self {
        Self(format!("{}[{label}]", self.0))
    }

    /// Raw path text; empty for the root.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the root path.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0)
        }
    }
}
