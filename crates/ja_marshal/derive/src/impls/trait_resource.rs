use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::JsonApiStruct;

pub(crate) fn impl_trait_resource(info: &JsonApiStruct<'_>) -> TokenStream {
    let ja_marshal_path = &info.ja_marshal_path;
    let resource_ = crate::path::resource_(ja_marshal_path);
    let field_visitor_ = crate::path::field_visitor_(ja_marshal_path);
    let result_ = crate::path::result_(ja_marshal_path);

    let ident = &info.ast.ident;
    let (impl_generics, ty_generics, where_clause) = info.ast.generics.split_for_impl();
    let visits = super::visit_fields(info);

    quote! {
        impl #impl_generics #resource_ for #ident #ty_generics #where_clause {
            fn visit_fields(&self, visitor: &mut dyn #field_visitor_) -> #result_<()> {
                #(#visits)*
                ::core::result::Result::Ok(())
            }
        }
    }
}
