use ja_tag::Role;
use syn::{Data, DeriveInput, Fields, Member, Type};

use crate::DeriveKind;
use crate::derive_data::FieldAttributes;

/// A field carrying a `jsonapi` descriptor.
pub(crate) struct TaggedField<'a> {
    pub member: Member,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

/// Struct information collected for `#[derive(Resource)]` and `#[derive(Meta)]`.
pub(crate) struct JsonApiStruct<'a> {
    pub ast: &'a DeriveInput,
    /// Tagged fields in declaration order.
    pub fields: Vec<TaggedField<'a>>,
    pub ja_marshal_path: syn::Path,
}

impl<'a> JsonApiStruct<'a> {
    pub fn from_input(ast: &'a DeriveInput, kind: DeriveKind) -> syn::Result<Self> {
        let Data::Struct(data) = &ast.data else {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "jsonapi derives only support structs",
            ));
        };

        let fields = match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unnamed(fields) => &fields.unnamed,
            Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    &ast.ident,
                    "jsonapi derives do not support unit structs",
                ));
            }
        };

        let mut tagged = Vec::with_capacity(fields.len());
        for (index, field) in fields.iter().enumerate() {
            let Some(attrs) = FieldAttributes::parse_attrs(&field.attrs, kind)? else {
                continue;
            };
            let member = match &field.ident {
                Some(ident) => Member::Named(ident.clone()),
                None => Member::Unnamed(index.into()),
            };
            tagged.push(TaggedField {
                member,
                ty: &field.ty,
                attrs,
            });
        }

        if kind == DeriveKind::Resource {
            Self::check_primary(ast, &tagged)?;
        }

        Ok(Self {
            ast,
            fields: tagged,
            ja_marshal_path: crate::path::ja_marshal(),
        })
    }

    fn check_primary(ast: &DeriveInput, fields: &[TaggedField<'_>]) -> syn::Result<()> {
        let mut primaries = fields.iter().filter(|f| f.attrs.role == Role::Primary);

        if primaries.next().is_none() {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "a resource needs one field tagged `#[jsonapi(\"primary,<type>\")]`",
            ));
        }
        if let Some(extra) = primaries.next() {
            return Err(syn::Error::new(
                extra.attrs.span,
                "a resource can have only one `primary` field",
            ));
        }
        Ok(())
    }
}
