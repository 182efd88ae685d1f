//! Container-level attribute parsing for `#[derive(Classified)]`.
//!
//! This module handles attributes on the struct itself, not on fields.

use syn::{Attribute, Meta, Result};

/// Options parsed from container-level `#[classified(...)]` attributes.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// If true, skip generating the `Debug` impl.
    pub(crate) skip_debug: bool,
}

/// Parses container-level `#[classified(...)]` attributes.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("classified")) {
        match &attr.meta {
            Meta::Path(path) => {
                return Err(syn::Error::new_spanned(
                    path,
                    "a record cannot carry a classification; annotate its fields instead",
                ));
            }
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip_debug") {
                        options.skip_debug = true;
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown container option `{}`; expected `skip_debug`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(
                    nv,
                    "name-value syntax is not supported for container-level #[classified]",
                ));
            }
        }
    }

    Ok(options)
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
    fn no_attribute_returns_defaults() {
        let attrs = parse_attrs(quote! {});
        let options = parse_container_options(&attrs).unwrap();
        assert!(!options.skip_debug);
    }

    #[test]
    fn skip_debug_is_parsed() {
        let attrs = parse_attrs(quote! { #[classified(skip_debug)] });
        let options = parse_container_options(&attrs).unwrap();
        assert!(options.skip_debug);
    }

    #[test]
    fn unknown_option_errors() {
        let attrs = parse_attrs(quote! { #[classified(PersonalData)] });
        let err = parse_container_options(&attrs).unwrap_err();
        assert!(err.to_string().contains("unknown container option"));
    }

    #[test]
    fn bare_classified_on_container_errors() {
        let attrs = parse_attrs(quote! { #[classified] });
        let err = parse_container_options(&attrs).unwrap_err();
        assert!(err.to_string().contains("annotate its fields"));
    }

    #[test]
    fn unrelated_attributes_are_ignored() {
        let attrs = parse_attrs(quote! { #[serde(rename_all = "PascalCase")] });
        let options = parse_container_options(&attrs).unwrap();
        assert!(!options.skip_debug);
    }
}
