//! Derive macros for `data-protection`.
//!
//! This crate generates the code behind `#[derive(Classified)]`. It:
//! - reads `#[classified(...)]` field attributes
//! - emits a `ClassifiedType` implementation that calls into a mapper
//! - emits a `ClassifiedRecord` implementation carrying the static field table
//!
//! It does **not** define classifications, redactors or policies. Those live in
//! the main `data-protection` crate and are applied at runtime.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod derive_struct;
mod generics;
mod strategy;
mod transform;
mod types;
use container::{parse_container_options, ContainerOptions};
use derive_struct::derive_struct;
use generics::{add_bounds, BoundKind};

/// Derives `data_protection::ClassifiedType` and `data_protection::ClassifiedRecord`
/// for structs.
///
/// # Container Attributes
///
/// - `#[classified(skip_debug)]` - Opt out of `Debug` impl generation. Use this when you need a
///   custom `Debug` implementation.
///
/// # Field Attributes
///
/// - **No annotation**: The field is copied verbatim into the logged copy.
///
/// - `#[classified(Marker)]`: The field carries the data classification of `Marker`, a type
///   implementing `data_protection::Classification`. The policy's redactor for that
///   classification is applied to the value. Works for `String`, `Cow<str>` and `Option`, `Vec`,
///   `Box` or map-value wrappers around them.
///
/// - `#[classified]`: The field is itself a `Classified` record (or a container of records) and
///   is walked recursively.
///
/// Scalars cannot carry a classification; enums and unions are rejected at compile time.
///
/// # Additional Generated Impls
///
/// - `Debug`: when *not* building with `cfg(any(test, feature = "testing"))`, classified fields
///   are formatted as the string `"[CLASSIFIED]"` rather than their values.
#[proc_macro_derive(Classified, attributes(classified))]
pub fn derive_classified(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the `data-protection` crate root.
///
/// Handles crate renaming (e.g., `dp = { package = "data-protection", ... }`)
/// and internal usage (when the derive is used inside `data-protection` itself).
fn crate_root() -> TokenStream {
    match crate_name("data-protection") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::data_protection },
    }
}

fn crate_path(item: &str) -> TokenStream {
    let root = crate_root();
    let item_ident = format_ident!("{}", item);
    quote! { #root::#item_ident }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { skip_debug } = parse_container_options(&attrs)?;

    let output = match data {
        Data::Struct(data) => derive_struct(&ident, data, &generics)?,
        Data::Enum(e) => {
            return Err(syn::Error::new(
                e.enum_token.span(),
                "`Classified` can only be derived for structs",
            ));
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Classified` cannot be derived for unions",
            ));
        }
    };

    let crate_root = crate_root();

    let classified_generics = add_bounds(
        generics.clone(),
        &output.walked_generics,
        BoundKind::ClassifiedType,
    );
    let classified_generics = add_bounds(
        classified_generics,
        &output.classified_generics,
        BoundKind::Classifiable,
    );
    let (impl_generics, ty_generics, where_clause) = classified_generics.split_for_impl();

    let debug_redacted_generics = add_bounds(
        generics.clone(),
        &output.debug_redacted_generics,
        BoundKind::Debug,
    );
    let (debug_redacted_impl_generics, debug_redacted_ty_generics, debug_redacted_where_clause) =
        debug_redacted_generics.split_for_impl();
    let debug_unredacted_generics =
        add_bounds(generics, &output.debug_unredacted_generics, BoundKind::Debug);
    let (
        debug_unredacted_impl_generics,
        debug_unredacted_ty_generics,
        debug_unredacted_where_clause,
    ) = debug_unredacted_generics.split_for_impl();

    let redaction_body = &output.redaction_body;
    let field_table = &output.field_table;
    let debug_redacted_body = &output.debug_redacted_body;
    let debug_unredacted_body = &output.debug_unredacted_body;

    let debug_impl = if skip_debug {
        quote! {}
    } else {
        quote! {
            #[cfg(any(test, feature = "testing"))]
            impl #debug_unredacted_impl_generics ::core::fmt::Debug for #ident #debug_unredacted_ty_generics #debug_unredacted_where_clause {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    #debug_unredacted_body
                }
            }

            #[cfg(not(any(test, feature = "testing")))]
            #[allow(unused_variables)]
            impl #debug_redacted_impl_generics ::core::fmt::Debug for #ident #debug_redacted_ty_generics #debug_redacted_where_clause {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    #debug_redacted_body
                }
            }
        }
    };

    Ok(quote! {
        impl #impl_generics #crate_root::ClassifiedType for #ident #ty_generics #where_clause {
            fn redact_with<M: #crate_root::RedactionMapper>(self, mapper: &M) -> Self {
                #redaction_body
            }
        }

        impl #impl_generics #crate_root::ClassifiedRecord for #ident #ty_generics #where_clause {
            const RECORD_NAME: &'static str = stringify!(#ident);

            fn field_classifications() -> &'static [#crate_root::FieldClassification] {
                const FIELDS: &[#crate_root::FieldClassification] = &[#(#field_table),*];
                FIELDS
            }
        }

        #debug_impl
    })
}
