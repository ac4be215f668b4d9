use alloc::boxed::Box;
use alloc::string::{String, ToString};

use ja_tag::{FieldSpec, Role, TagError};
use serde_json::{Map, Value};

use crate::attribute::encode_attribute;
use crate::{Field, FieldVisitor, Result};

/// A flat object rendered as the top-level `meta` member.
///
/// Fields are reported as [`Field::Attribute`] with an attribute
/// [`FieldSpec`], usually through `#[derive(Meta)]`:
///
/// ```
/// use ja_marshal::Meta;
///
/// #[derive(Meta)]
/// struct Paging {
///     #[jsonapi("total")]
///     total: u64,
///     #[jsonapi("cursor,omitempty")]
///     cursor: String,
/// }
///
/// let meta = ja_marshal::encode_meta(&Paging { total: 3, cursor: String::new() }).unwrap();
/// assert_eq!(serde_json::Value::Object(meta), serde_json::json!({ "total": 3 }));
/// ```
pub trait Meta {
    fn visit_meta(&self, visitor: &mut dyn FieldVisitor) -> Result<()>;
}

impl<T: Meta + ?Sized> Meta for &T {
    #[inline]
    fn visit_meta(&self, visitor: &mut dyn FieldVisitor) -> Result<()> {
        (**self).visit_meta(visitor)
    }
}

impl<T: Meta + ?Sized> Meta for Box<T> {
    #[inline]
    fn visit_meta(&self, visitor: &mut dyn FieldVisitor) -> Result<()> {
        (**self).visit_meta(visitor)
    }
}

impl Meta for Map<String, Value> {
    fn visit_meta(&self, visitor: &mut dyn FieldVisitor) -> Result<()> {
        self.iter().try_for_each(|(name, value)| {
            visitor.visit_field(&FieldSpec::attribute(name, false), Field::Attribute(value))
        })
    }
}

struct MetaEncoder {
    map: Map<String, Value>,
}

impl FieldVisitor for MetaEncoder {
    fn visit_field(&mut self, spec: &FieldSpec<'_>, field: Field<'_>) -> Result<()> {
        match (spec.role, field) {
            (Role::Attribute, Field::Attribute(value)) => {
                if let Some(value) = encode_attribute(spec, value)? {
                    self.map.insert(spec.name.to_string(), value);
                }
            }
            (role, field) => {
                return Err(TagError::RoleMismatch {
                    spec: role,
                    kind: field.kind(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Encodes a meta object into a JSON map.
///
/// Never recurses and never contributes to `included`.
pub fn encode_meta<M: Meta + ?Sized>(meta: &M) -> Result<Map<String, Value>> {
    let mut encoder = MetaEncoder { map: Map::new() };
    meta.visit_meta(&mut encoder)?;
    Ok(encoder.map)
}
