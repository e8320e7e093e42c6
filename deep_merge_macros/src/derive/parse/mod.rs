//! Parsing utilities for the `Mergeable` derive macro.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr};

mod input;

pub(crate) use input::{InputShape, ParsedInput, RecordField, parse_input};

/// Struct-level attributes recognised by `#[derive(Mergeable)]`.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Treat the type as an opaque value merged by overwriting.
    pub scalar: bool,
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[mergeable(crate = "merge_alias")]`, generated code
    /// references items through `merge_alias::` instead of `deep_merge::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(Mergeable)]`.
#[derive(Default, Clone, Copy)]
pub(crate) struct FieldAttrs {
    /// Leave the field untouched during merges.
    pub skip: bool,
}

/// Iterate all `#[mergeable(...)]` attributes once and apply a callback.
fn parse_mergeable<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("mergeable")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn unknown_key(meta: &ParseNestedMeta, expected: &str) -> syn::Error {
    let key = meta
        .path
        .get_ident()
        .map_or_else(|| String::from("<path>"), ToString::to_string);
    meta.error(format!(
        "unknown mergeable attribute `{key}`; expected {expected}"
    ))
}

/// Extracts `#[mergeable(...)]` metadata applied to a struct or enum.
///
/// Recognised keys are `scalar` and `crate`. Unknown keys are rejected.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_mergeable(attrs, |meta| {
        if meta.path.is_ident("scalar") {
            out.scalar = true;
            Ok(())
        } else if meta.path.is_ident("crate") {
            let lit = meta.value()?.parse::<LitStr>()?;
            let path: syn::Path = lit.parse()?;
            out.crate_path = Some(path);
            Ok(())
        } else {
            Err(unknown_key(meta, "`scalar` or `crate`"))
        }
    })?;
    Ok(out)
}

/// Parses field-level `#[mergeable(...)]` attributes.
///
/// Only `skip` is recognised.
pub(crate) fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_mergeable(&field.attrs, |meta| {
        if meta.path.is_ident("skip") {
            out.skip = true;
            Ok(())
        } else {
            Err(unknown_key(meta, "`skip`"))
        }
    })?;
    Ok(out)
}
