//! Procedural macros for `deep_merge`.
//!
//! The [`Mergeable`] derive describes a struct to the merge engine as a
//! record: a fixed list of fields visited in declaration order. Types marked
//! `#[mergeable(scalar)]` are described as opaque values instead and are
//! merged by overwriting.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `deep_merge::Mergeable`.
///
/// Struct attributes:
///
/// - `#[mergeable(scalar)]` treats the whole type as a scalar. Requires
///   `Clone + Default + PartialEq`; this is also the only form accepted on
///   enums.
/// - `#[mergeable(crate = "path")]` routes generated paths through an
///   aliased dependency.
///
/// Field attributes:
///
/// - `#[mergeable(skip)]` leaves the field untouched during merges. It still
///   counts towards the record's field count and emptiness.
#[proc_macro_derive(Mergeable, attributes(mergeable))]
pub fn derive_mergeable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
