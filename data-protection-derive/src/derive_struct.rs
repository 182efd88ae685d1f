//! Struct-specific `Classified` derivation.
//!
//! Generates the traversal body, the static field table and both `Debug`
//! bodies for named and tuple structs.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::{spanned::Spanned, DataStruct, Field, Fields, Result};

use crate::{
    strategy::parse_field_strategy,
    transform::{generate_field_transform, DeriveContext},
};

pub(crate) struct StructDeriveOutput {
    pub(crate) redaction_body: TokenStream,
    pub(crate) field_table: Vec<TokenStream>,
    pub(crate) walked_generics: Vec<Ident>,
    pub(crate) classified_generics: Vec<Ident>,
    pub(crate) debug_redacted_body: TokenStream,
    pub(crate) debug_redacted_generics: Vec<Ident>,
    pub(crate) debug_unredacted_body: TokenStream,
    pub(crate) debug_unredacted_generics: Vec<Ident>,
}

#[derive(Clone, Copy)]
enum Shape {
    Named,
    Tuple,
}

pub(crate) fn derive_struct(
    name: &Ident,
    data: DataStruct,
    generics: &syn::Generics,
) -> Result<StructDeriveOutput> {
    let (shape, fields): (Shape, Vec<Field>) = match data.fields {
        Fields::Named(fields) => (Shape::Named, fields.named.into_iter().collect()),
        Fields::Unnamed(fields) => (Shape::Tuple, fields.unnamed.into_iter().collect()),
        Fields::Unit => {
            return Ok(StructDeriveOutput {
                redaction_body: quote! { self },
                field_table: Vec::new(),
                walked_generics: Vec::new(),
                classified_generics: Vec::new(),
                debug_redacted_body: quote! { f.write_str(stringify!(#name)) },
                debug_redacted_generics: Vec::new(),
                debug_unredacted_body: quote! { f.write_str(stringify!(#name)) },
                debug_unredacted_generics: Vec::new(),
            });
        }
    };

    let mut bindings = Vec::new();
    let mut transforms = Vec::new();
    let mut debug_redacted_fields = Vec::new();
    let mut debug_unredacted_fields = Vec::new();
    let mut field_table = Vec::new();
    let mut walked_generics = Vec::new();
    let mut classified_generics = Vec::new();
    let mut debug_redacted_generics = Vec::new();
    let mut debug_unredacted_generics = Vec::new();

    let mut ctx = DeriveContext {
        generics,
        walked_generics: &mut walked_generics,
        classified_generics: &mut classified_generics,
        debug_redacted_generics: &mut debug_redacted_generics,
        debug_unredacted_generics: &mut debug_unredacted_generics,
        field_table: &mut field_table,
    };

    for (index, field) in fields.into_iter().enumerate() {
        let span = field.span();
        let strategy = parse_field_strategy(&field.attrs)?;
        let (binding, field_name) = match (shape, field.ident) {
            (Shape::Named, Some(ident)) => {
                let field_name = ident.to_string();
                (ident, field_name)
            }
            _ => (format_ident!("field_{index}"), index.to_string()),
        };

        transforms.push(generate_field_transform(
            &mut ctx,
            &field.ty,
            &binding,
            &field_name,
            span,
            &strategy,
        )?);

        let (redacted, unredacted) = match shape {
            Shape::Named if strategy.is_classified() => (
                quote_spanned! { span => debug.field(stringify!(#binding), &"[CLASSIFIED]"); },
                quote_spanned! { span => debug.field(stringify!(#binding), #binding); },
            ),
            Shape::Named => (
                quote_spanned! { span => debug.field(stringify!(#binding), #binding); },
                quote_spanned! { span => debug.field(stringify!(#binding), #binding); },
            ),
            Shape::Tuple if strategy.is_classified() => (
                quote_spanned! { span => debug.field(&"[CLASSIFIED]"); },
                quote_spanned! { span => debug.field(#binding); },
            ),
            Shape::Tuple => (
                quote_spanned! { span => debug.field(#binding); },
                quote_spanned! { span => debug.field(#binding); },
            ),
        };
        debug_redacted_fields.push(redacted);
        debug_unredacted_fields.push(unredacted);
        bindings.push(binding);
    }

    let (destructure, debug_builder) = match shape {
        Shape::Named => (
            quote! { Self { #(#bindings),* } },
            quote! { f.debug_struct(stringify!(#name)) },
        ),
        Shape::Tuple => (
            quote! { Self ( #(#bindings),* ) },
            quote! { f.debug_tuple(stringify!(#name)) },
        ),
    };

    Ok(StructDeriveOutput {
        redaction_body: quote! {
            let #destructure = self;
            #(#transforms)*
            #destructure
        },
        field_table,
        walked_generics,
        classified_generics,
        debug_redacted_body: quote! {
            let #destructure = self;
            let mut debug = #debug_builder;
            #(#debug_redacted_fields)*
            debug.finish()
        },
        debug_redacted_generics,
        debug_unredacted_body: quote! {
            let #destructure = self;
            let mut debug = #debug_builder;
            #(#debug_unredacted_fields)*
            debug.finish()
        },
        debug_unredacted_generics,
    })
}
