//! Generic type parameter handling and trait bound management.
//!
//! Bounds are added only for generics that actually appear in walked or
//! classified fields. `PhantomData<T>` is skipped: a marker field is copied
//! verbatim, so `T` needs no bound.

use syn::{parse_quote, Ident};

use crate::crate_path;

/// The trait bound to add to a collected generic parameter.
#[derive(Clone, Copy, Debug)]
pub(crate) enum BoundKind {
    /// `T: data_protection::ClassifiedType` for walked fields.
    ClassifiedType,
    /// `T: data_protection::Classifiable` for classified fields.
    Classifiable,
    /// `T: Debug` for the generated `Debug` impls.
    Debug,
}

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    let syn::Type::Path(path) = ty else {
        return;
    };
    let Some(segment) = path.path.segments.last() else {
        return;
    };
    if segment.ident == "PhantomData" {
        return;
    }

    if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
        for arg in &args.args {
            if let syn::GenericArgument::Type(inner_ty) = arg {
                collect_generics_from_type(inner_ty, generics, result);
            }
        }
    }

    for param in generics.type_params() {
        if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
            result.push(param.ident.clone());
        }
    }
}

pub(crate) fn add_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
    kind: BoundKind,
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if !used_generics.iter().any(|g| g == &param.ident) {
            continue;
        }
        match kind {
            BoundKind::ClassifiedType => {
                let path = crate_path("ClassifiedType");
                param.bounds.push(parse_quote!(#path));
            }
            BoundKind::Classifiable => {
                let path = crate_path("Classifiable");
                param.bounds.push(parse_quote!(#path));
            }
            BoundKind::Debug => param.bounds.push(parse_quote!(::core::fmt::Debug)),
        }
    }
    generics
}
