//! Per-field code generation shared by named and tuple structs.

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote_spanned;
use syn::Result;

use crate::{
    crate_path, generics::collect_generics_from_type, strategy::Strategy, types::is_scalar_type,
};

/// Accumulated state during field processing.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    pub(crate) walked_generics: &'a mut Vec<Ident>,
    pub(crate) classified_generics: &'a mut Vec<Ident>,
    pub(crate) debug_redacted_generics: &'a mut Vec<Ident>,
    pub(crate) debug_unredacted_generics: &'a mut Vec<Ident>,
    pub(crate) field_table: &'a mut Vec<TokenStream>,
}

/// Generates the transform token stream for a single field and records its
/// classification in the static field table.
///
/// | Annotation | Behavior |
/// |------------|----------|
/// | None | Identity |
/// | `#[classified]` | `ClassifiedType::redact_with` on the field |
/// | `#[classified(Marker)]` | `Classifiable::apply_classification::<Marker, _>` |
pub(crate) fn generate_field_transform(
    ctx: &mut DeriveContext<'_>,
    ty: &syn::Type,
    binding: &Ident,
    field_name: &str,
    span: Span,
    strategy: &Strategy,
) -> Result<TokenStream> {
    collect_generics_from_type(ty, ctx.generics, ctx.debug_unredacted_generics);

    match strategy {
        Strategy::PassThrough => {
            collect_generics_from_type(ty, ctx.generics, ctx.debug_redacted_generics);
            Ok(quote_spanned! { span =>
                let #binding = #binding;
            })
        }
        Strategy::Walk => {
            if is_scalar_type(ty) {
                return Err(syn::Error::new(
                    span,
                    "scalar fields cannot be walked: remove #[classified] to copy the value, \
                    or wrap it in a string-like newtype to classify it",
                ));
            }
            collect_generics_from_type(ty, ctx.generics, ctx.walked_generics);
            collect_generics_from_type(ty, ctx.generics, ctx.debug_redacted_generics);
            let classified_type = crate_path("ClassifiedType");
            Ok(quote_spanned! { span =>
                let #binding = #classified_type::redact_with(#binding, mapper);
            })
        }
        Strategy::Classify(marker) => {
            if is_scalar_type(ty) {
                return Err(syn::Error::new(
                    span,
                    "scalar fields cannot carry a classification: only string-like values \
                    (String, Cow<str> and containers of them) can be redacted",
                ));
            }
            collect_generics_from_type(ty, ctx.generics, ctx.classified_generics);
            let classifiable = crate_path("Classifiable");
            let classification = crate_path("Classification");
            let field_classification = crate_path("FieldClassification");
            ctx.field_table.push(quote_spanned! { span =>
                #field_classification::new(
                    #field_name,
                    <#marker as #classification>::CLASSIFICATION,
                )
            });
            Ok(quote_spanned! { span =>
                let #binding = #classifiable::apply_classification::<#marker, _>(#binding, mapper);
            })
        }
    }
}
