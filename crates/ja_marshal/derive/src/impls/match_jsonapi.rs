use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::DeriveKind;
use crate::derive_data::JsonApiStruct;

/// Provided for `#[derive(Resource)]` and `#[derive(Meta)]`.
pub(crate) fn match_jsonapi_impls(ast: DeriveInput, kind: DeriveKind) -> TokenStream {
    let info = match JsonApiStruct::from_input(&ast, kind) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let jsonapi_impls = match kind {
        DeriveKind::Resource => super::impl_trait_resource(&info),
        DeriveKind::Meta => super::impl_trait_meta(&info),
    };

    TokenStream::from(quote! {
        const _: () = {
            #jsonapi_impls
        };
    })
}
