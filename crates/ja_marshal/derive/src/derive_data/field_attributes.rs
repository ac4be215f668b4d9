use ja_tag::{FieldSpec, Role};
use proc_macro2::Span;
use syn::{Attribute, LitStr};

use crate::{DeriveKind, JSONAPI_ATTRIBUTE_NAME};

/// The `#[jsonapi("...")]` descriptor of a field, parsed and validated.
#[derive(Debug, Clone)]
pub(crate) struct FieldAttributes {
    pub role: Role,
    pub name: String,
    pub omit_empty: bool,
    /// Span of the descriptor literal.
    pub span: Span,
}

impl FieldAttributes {
    /// Returns `None` for fields without a `jsonapi` attribute.
    pub fn parse_attrs(attrs: &[Attribute], kind: DeriveKind) -> syn::Result<Option<Self>> {
        let mut parsed: Option<Self> = None;

        for attr in attrs {
            if !attr.path().is_ident(JSONAPI_ATTRIBUTE_NAME) {
                continue;
            }
            if parsed.is_some() {
                return Err(syn::Error::new_spanned(
                    attr,
                    "a field can carry only one `jsonapi` descriptor",
                ));
            }

            let descriptor: LitStr = attr.parse_args()?;
            parsed = Some(Self::parse_descriptor(&descriptor, kind)?);
        }

        Ok(parsed)
    }

    fn parse_descriptor(descriptor: &LitStr, kind: DeriveKind) -> syn::Result<Self> {
        let text = descriptor.value();
        let spec = match kind {
            DeriveKind::Resource => FieldSpec::parse(&text),
            DeriveKind::Meta => FieldSpec::parse_meta(&text),
        }
        .map_err(|err| {
            syn::Error::new(descriptor.span(), format!("bad jsonapi field descriptor: {err}"))
        })?;

        Ok(Self {
            role: spec.role,
            name: spec.name.to_owned(),
            omit_empty: spec.omit_empty,
            span: descriptor.span(),
        })
    }
}
