//! Expansion pipeline for `#[derive(Mergeable)]`.
//!
//! Parsing validates the input and collects attribute metadata up front so
//! generation never has to report errors.

mod crate_path;
mod generate;
mod parse;

use proc_macro2::TokenStream;
use syn::DeriveInput;

use parse::{InputShape, parse_input};

/// Expand the derive for `input`.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse_input(input)?;
    let krate = crate_path::resolve(parsed.attrs.crate_path.as_ref());
    Ok(match &parsed.shape {
        InputShape::Scalar => generate::scalar_impl(&parsed, &krate),
        InputShape::Record(fields) => generate::record_impl(&parsed, fields, &krate),
    })
}
