//! Code generation for `#[derive(Mergeable)]`.
//!
//! Records get a `Mergeable` impl plus a `Record` impl exposing their fields
//! by position. Scalars get a `Mergeable` impl that compares against the
//! type's default and merges by cloning.

use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::{Generics, parse_quote};

use super::parse::{ParsedInput, RecordField};


/// Add `bound` to every type parameter.
fn bounded_generics(generics: &Generics, bound: &syn::TypeParamBound) -> Generics {
    let mut out = generics.clone();
    for param in out.type_params_mut() {
        param.bounds.push(bound.clone());
    }
    out
}

/// Build a where clause requiring `Self: #required` alongside any
/// predicates the input declared.
fn where_tokens(parsed: &ParsedInput, generics: &Generics, required: &TokenStream) -> TokenStream {
    let ident = &parsed.ident;
    let (_, ty_generics, where_clause) = generics.split_for_impl();
    let predicates = where_clause
        .map(|clause| clause.predicates.iter().collect::<Vec<_>>())
        .unwrap_or_default();
    quote! {
        where
            #ident #ty_generics: #required,
            #( #predicates, )*
    }
}

/// Generate the impls describing a record.
pub(crate) fn record_impl(
    parsed: &ParsedInput,
    fields: &[RecordField],
    krate: &TokenStream,
) -> TokenStream {
    let ident = &parsed.ident;
    let reflect = quote! { #krate::reflect };
    let bound: syn::TypeParamBound = parse_quote!(#reflect::Mergeable);
    let generics = bounded_generics(&parsed.generics, &bound);
    let (impl_generics, ty_generics, _) = generics.split_for_impl();
    let where_clause = where_tokens(parsed, &generics, &quote! { ::core::clone::Clone });

    let count = fields.len();
    let zero_checks = fields.iter().map(|field| {
        let member = &field.member;
        quote! { #reflect::Mergeable::is_zero(&self.#member) }
    });
    let name_arms = fields.iter().enumerate().map(|(position, field)| {
        let index = Literal::usize_unsuffixed(position);
        let name = &field.name;
        quote! { #index => ::core::option::Option::Some(#name), }
    });
    let field_arms = fields.iter().enumerate().map(|(position, field)| {
        let index = Literal::usize_unsuffixed(position);
        let member = &field.member;
        quote! {
            #index => ::core::option::Option::Some(&self.#member as &dyn #reflect::Mergeable),
        }
    });
    let field_mut_arms = fields
        .iter()
        .enumerate()
        .filter(|(_, field)| !field.skip)
        .map(|(position, field)| {
            let index = Literal::usize_unsuffixed(position);
            let member = &field.member;
            quote! {
                #index => ::core::option::Option::Some(
                    &mut self.#member as &mut dyn #reflect::Mergeable
                ),
            }
        });

    quote! {
        #[automatically_derived]
        impl #impl_generics #reflect::Mergeable for #ident #ty_generics #where_clause {
            fn is_zero(&self) -> bool {
                true #( && #zero_checks )*
            }

            fn shape(&self) -> #reflect::Shape<'_> {
                #reflect::Shape::Record(self)
            }

            fn shape_mut(&mut self) -> #reflect::ShapeMut<'_> {
                #reflect::ShapeMut::Record(self)
            }

            fn overwrite_from(&mut self, source: &dyn #reflect::Mergeable) -> bool {
                #reflect::overwrite_with_clone(self, source)
            }
        }

        #[automatically_derived]
        impl #impl_generics #reflect::Record for #ident #ty_generics #where_clause {
            fn field_count(&self) -> usize {
                #count
            }

            fn field_name(&self, index: usize) -> ::core::option::Option<&'static str> {
                match index {
                    #( #name_arms )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field(&self, index: usize) -> ::core::option::Option<&dyn #reflect::Mergeable> {
                match index {
                    #( #field_arms )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn #reflect::Mergeable> {
                match index {
                    #( #field_mut_arms )*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}

/// Generate the impl describing an opaque scalar.
pub(crate) fn scalar_impl(parsed: &ParsedInput, krate: &TokenStream) -> TokenStream {
    let ident = &parsed.ident;
    let reflect = quote! { #krate::reflect };
    let bound: syn::TypeParamBound = parse_quote!('static);
    let generics = bounded_generics(&parsed.generics, &bound);
    let (impl_generics, ty_generics, _) = generics.split_for_impl();
    let where_clause = where_tokens(
        parsed,
        &generics,
        &quote! {
            ::core::clone::Clone + ::core::default::Default + ::core::cmp::PartialEq
        },
    );

    quote! {
        #[automatically_derived]
        impl #impl_generics #reflect::Mergeable for #ident #ty_generics #where_clause {
            fn is_zero(&self) -> bool {
                #reflect::is_default(self)
            }

            fn shape(&self) -> #reflect::Shape<'_> {
                #reflect::Shape::Scalar
            }

            fn shape_mut(&mut self) -> #reflect::ShapeMut<'_> {
                #reflect::ShapeMut::Scalar
            }

            fn overwrite_from(&mut self, source: &dyn #reflect::Mergeable) -> bool {
                #reflect::overwrite_with_clone(self, source)
            }
        }
    }
}
