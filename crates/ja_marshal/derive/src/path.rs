//! Paths of the runtime items named by generated code.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the access path to the `ja_marshal` crate.
///
/// 1. For crates that depend on `ja_marshal`, `::ja_marshal` is returned.
/// 2. For crates that depend on `ja_core`, `::ja_core::marshal` is returned.
/// 3. For other situations, `::ja_marshal` is returned, but this may be incorrect.
///
/// Reading the manifest is not free, call this once per expansion.
pub(crate) fn ja_marshal() -> syn::Path {
    ja_macro_utils::Manifest::shared(|manifest| manifest.crate_path("ja_marshal"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn resource_(ja_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #ja_marshal_path::Resource
    }
}

#[inline(always)]
pub(crate) fn meta_(ja_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #ja_marshal_path::Meta
    }
}

#[inline(always)]
pub(crate) fn field_visitor_(ja_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #ja_marshal_path::FieldVisitor
    }
}

#[inline(always)]
pub(crate) fn field_(ja_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #ja_marshal_path::Field
    }
}

#[inline(always)]
pub(crate) fn field_spec_(ja_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #ja_marshal_path::FieldSpec
    }
}

#[inline(always)]
pub(crate) fn result_(ja_marshal_path: &syn::Path) -> TokenStream {
    quote! {
        #ja_marshal_path::Result
    }
}
