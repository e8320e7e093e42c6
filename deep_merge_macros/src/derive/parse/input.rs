//! Input parsing for the `Mergeable` derive macro.
//!
//! This module gathers the type identifier, generics, fields and attribute
//! metadata in one pass so macro expansion can fail fast with useful errors.

use syn::ext::IdentExt as _;
use syn::{Data, DeriveInput, Fields, GenericParam, Generics, Member};

use super::{StructAttrs, parse_field_attrs, parse_struct_attrs};

/// A field of a record, in declaration order.
pub(crate) struct RecordField {
    /// Accessor used as `self.#member`.
    pub member: Member,
    /// Declared name; the position for tuple fields.
    pub name: String,
    /// Whether the field is left alone by merges.
    pub skip: bool,
}

/// How the type is described to the engine.
pub(crate) enum InputShape {
    /// Field-by-field record.
    Record(Vec<RecordField>),
    /// Opaque value merged by overwriting.
    Scalar,
}

/// Everything generation needs from the derive input.
pub(crate) struct ParsedInput {
    pub ident: syn::Ident,
    pub generics: Generics,
    pub attrs: StructAttrs,
    pub shape: InputShape,
}

/// Gathers information from the user-provided type.
///
/// Structs of any form become records unless marked scalar; enums must be
/// marked scalar. Unions and lifetime parameters are rejected because the
/// engine works on `'static` values through `Any`.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let attrs = parse_struct_attrs(&input.attrs)?;
    reject_lifetimes(&input.generics)?;
    let shape = match &input.data {
        _ if attrs.scalar => InputShape::Scalar,
        Data::Struct(data) => InputShape::Record(record_fields(&data.fields)?),
        Data::Enum(data) => {
            return Err(syn::Error::new_spanned(
                data.enum_token,
                "Mergeable can only be derived for enums marked `#[mergeable(scalar)]`",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "Mergeable cannot be derived for unions",
            ));
        }
    };
    Ok(ParsedInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        attrs,
        shape,
    })
}

fn reject_lifetimes(generics: &Generics) -> syn::Result<()> {
    if let Some(param) = generics
        .params
        .iter()
        .find(|candidate| matches!(candidate, GenericParam::Lifetime(_)))
    {
        return Err(syn::Error::new_spanned(
            param,
            "Mergeable types must be 'static; lifetime parameters are not supported",
        ));
    }
    Ok(())
}

fn record_fields(fields: &Fields) -> syn::Result<Vec<RecordField>> {
    fields
        .iter()
        .enumerate()
        .map(|(position, field)| {
            let attrs = parse_field_attrs(field)?;
            let (member, name) = field.ident.as_ref().map_or_else(
                || (Member::from(position), position.to_string()),
                |ident| (Member::Named(ident.clone()), ident.unraw().to_string()),
            );
            Ok(RecordField {
                member,
                name,
                skip: attrs.skip,
            })
        })
        .collect()
}
