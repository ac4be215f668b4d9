use ja_tag::Role;
use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::{JsonApiStruct, TaggedField};

/// One `visitor.visit_field(..)?;` statement per tagged field.
///
/// ```ignore
/// visitor.visit_field(
///     &_path_::FieldSpec::attribute("name", false),
///     _path_::Field::Attribute(&self.name),
/// )?;
/// ```
pub(crate) fn visit_fields(info: &JsonApiStruct<'_>) -> Vec<TokenStream> {
    let ja_marshal_path = &info.ja_marshal_path;
    let field_spec_ = crate::path::field_spec_(ja_marshal_path);
    let field_ = crate::path::field_(ja_marshal_path);

    info.fields
        .iter()
        .map(|field| {
            let spec = field_spec(field, &field_spec_);
            let value = field_value(field, &field_);
            quote! {
                visitor.visit_field(&#spec, #value)?;
            }
        })
        .collect()
}

fn field_spec(field: &TaggedField<'_>, field_spec_: &TokenStream) -> TokenStream {
    let name = &field.attrs.name;
    let omit_empty = field.attrs.omit_empty;

    match field.attrs.role {
        Role::Primary => quote! { #field_spec_::primary(#name) },
        Role::ClientId => quote! { #field_spec_::client_id() },
        Role::Attribute => quote! { #field_spec_::attribute(#name, #omit_empty) },
        Role::Relation => quote! { #field_spec_::relation(#name, #omit_empty) },
    }
}

// Spanned on the field type so that missing trait impls point at it.
fn field_value(field: &TaggedField<'_>, field_: &TokenStream) -> TokenStream {
    let member = &field.member;
    let span = syn::spanned::Spanned::span(field.ty);

    match field.attrs.role {
        Role::Primary => quote_spanned! { span=> #field_::Id(&self.#member) },
        Role::ClientId => quote_spanned! { span=>
            #field_::ClientId(::core::convert::AsRef::<str>::as_ref(&self.#member))
        },
        Role::Attribute => quote_spanned! { span=> #field_::Attribute(&self.#member) },
        Role::Relation => quote_spanned! { span=> #field_::Relation(&self.#member) },
    }
}
