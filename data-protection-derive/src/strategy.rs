//! Parsing of `#[classified(...)]` field attributes.
//!
//! This module maps attribute syntax to traversal decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, Meta, Result};

/// Field transformation strategy based on `#[classified(...)]` attributes.
///
/// | Attribute | Strategy | Behavior |
/// |-----------|----------|----------|
/// | None | `PassThrough` | Field copied verbatim |
/// | `#[classified]` | `Walk` | Walk a nested `Classified` record |
/// | `#[classified(Marker)]` | `Classify(Marker)` | Redact with the marker's redactor |
#[derive(Clone, Debug)]
pub(crate) enum Strategy {
    /// No annotation.
    PassThrough,
    /// Bare `#[classified]`: the field is a record (or container of records)
    /// with classified fields of its own.
    Walk,
    /// `#[classified(Marker)]`: the field carries `Marker::CLASSIFICATION`.
    Classify(syn::Path),
}

impl Strategy {
    pub(crate) const fn is_classified(&self) -> bool {
        matches!(self, Self::Classify(_))
    }
}

fn set_strategy(target: &mut Option<Strategy>, next: Strategy, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple #[classified] attributes specified on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_strategy(attrs: &[Attribute]) -> Result<Strategy> {
    let mut strategy: Option<Strategy> = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("classified")) {
        match &attr.meta {
            Meta::Path(_) => {
                set_strategy(&mut strategy, Strategy::Walk, attr.span())?;
            }
            Meta::List(list) => match syn::parse2::<syn::Path>(list.tokens.clone()) {
                Ok(path) => {
                    set_strategy(&mut strategy, Strategy::Classify(path), attr.span())?;
                }
                Err(_) => {
                    return Err(syn::Error::new(
                        attr.span(),
                        "expected a classification type (e.g., #[classified(PersonalData)])",
                    ));
                }
            },
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[classified]",
                ));
            }
        }
    }

    Ok(strategy.unwrap_or(Strategy::PassThrough))
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::*;

    fn parse_attrs(tokens: proc_macro2::TokenStream) -> Vec<Attribute> {
        let input: DeriveInput = syn::parse2(quote! {
            #tokens
            struct Dummy;
        })
        .expect("should parse as DeriveInput");
        input.attrs
    }

    #[test]
    fn no_attribute_returns_passthrough() {
        let attrs = parse_attrs(quote! {});
        let strategy = parse_field_strategy(&attrs).unwrap();
        assert!(matches!(strategy, Strategy::PassThrough));
    }

    #[test]
    fn bare_classified_returns_walk() {
        let attrs = parse_attrs(quote! { #[classified] });
        let strategy = parse_field_strategy(&attrs).unwrap();
        assert!(matches!(strategy, Strategy::Walk));
        assert!(!strategy.is_classified());
    }

    #[test]
    fn classified_with_marker_returns_classify() {
        let attrs = parse_attrs(quote! { #[classified(PersonalData)] });
        let strategy = parse_field_strategy(&attrs).unwrap();
        assert!(strategy.is_classified());
        match strategy {
            Strategy::Classify(path) => assert!(path.is_ident("PersonalData")),
            _ => panic!("expected Classify"),
        }
    }

    #[test]
    fn classified_with_qualified_marker() {
        let attrs = parse_attrs(quote! { #[classified(taxonomy::SensitiveData)] });
        match parse_field_strategy(&attrs).unwrap() {
            Strategy::Classify(path) => assert_eq!(path.segments.len(), 2),
            _ => panic!("expected Classify"),
        }
    }

    #[test]
    fn multiple_classified_attributes_error() {
        let attrs = parse_attrs(quote! {
            #[classified]
            #[classified(SensitiveData)]
        });
        let err = parse_field_strategy(&attrs).unwrap_err();
        assert!(err
            .to_string()
            .contains("multiple #[classified] attributes"));
    }

    #[test]
    fn name_value_syntax_error() {
        let attrs = parse_attrs(quote! { #[classified = "PersonalData"] });
        let err = parse_field_strategy(&attrs).unwrap_err();
        assert!(err
            .to_string()
            .contains("name-value syntax is not supported"));
    }

    #[test]
    fn invalid_marker_syntax_error() {
        let attrs = parse_attrs(quote! { #[classified(123)] });
        let err = parse_field_strategy(&attrs).unwrap_err();
        assert!(err.to_string().contains("expected a classification type"));
    }

    #[test]
    fn other_attributes_ignored() {
        let attrs = parse_attrs(quote! {
            #[serde(rename = "Name")]
            #[doc = "patient name"]
        });
        let strategy = parse_field_strategy(&attrs).unwrap();
        assert!(matches!(strategy, Strategy::PassThrough));
    }
}
