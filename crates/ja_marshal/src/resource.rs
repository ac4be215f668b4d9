use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;
use alloc::vec::Vec;

use ja_tag::FieldSpec;

use crate::{Attribute, Result};

// -----------------------------------------------------------------------------
// Field

/// A borrowed struct field, as handed to a [`FieldVisitor`].
///
/// The variant must agree with the role of the [`FieldSpec`] it is visited
/// with, a mismatch is reported as [`MarshalError::BadFieldSpec`].
///
/// [`MarshalError::BadFieldSpec`]: crate::MarshalError::BadFieldSpec
#[derive(Clone, Copy)]
pub enum Field<'a> {
    /// The primary key. Only strings and integers are accepted at runtime.
    Id(&'a dyn erased_serde::Serialize),
    /// The client-generated identifier, omitted when empty.
    ClientId(&'a str),
    /// A value stored in `attributes`.
    Attribute(&'a dyn Attribute),
    /// A to-one or to-many link.
    Relation(&'a dyn Relation),
}

impl Field<'_> {
    /// Short description of the variant used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Field::Id(_) => "identifier",
            Field::ClientId(_) => "string",
            Field::Attribute(_) => "attribute value",
            Field::Relation(_) => "relationship",
        }
    }
}

/// Receives the tagged fields of a [`Resource`] or [`Meta`](crate::Meta) in
/// declaration order.
pub trait FieldVisitor {
    fn visit_field(&mut self, spec: &FieldSpec<'_>, field: Field<'_>) -> Result<()>;
}

// -----------------------------------------------------------------------------
// Resource

/// A type that can be rendered as a resource object.
///
/// Usually derived:
///
/// ```
/// use ja_marshal::Resource;
///
/// #[derive(Resource)]
/// struct Comment {
///     #[jsonapi("primary,comments")]
///     id: u64,
///     #[jsonapi("attr,body")]
///     body: String,
/// }
///
/// let payload = ja_marshal::marshal_one(&Comment { id: 1, body: "hi".into() }).unwrap();
/// assert_eq!(payload.data.id, "1");
/// ```
///
/// A manual implementation visits every field with its descriptor. Exactly
/// one field should carry the `primary` role.
///
/// ```
/// use ja_marshal::{Field, FieldSpec, FieldVisitor, Resource, Result};
///
/// struct Tag(String);
///
/// impl Resource for Tag {
///     fn visit_fields(&self, visitor: &mut dyn FieldVisitor) -> Result<()> {
///         visitor.visit_field(&FieldSpec::primary("tags"), Field::Id(&self.0))
///     }
/// }
///
/// let node = ja_marshal::marshal_one(&Tag("rust".into())).unwrap().data;
/// assert_eq!((node.resource_type.as_str(), node.id.as_str()), ("tags", "rust"));
/// ```
pub trait Resource {
    fn visit_fields(&self, visitor: &mut dyn FieldVisitor) -> Result<()>;
}

macro_rules! impl_resource_for_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: Resource + ?Sized> Resource for $ptr<T> {
                #[inline]
                fn visit_fields(&self, visitor: &mut dyn FieldVisitor) -> Result<()> {
                    (**self).visit_fields(visitor)
                }
            }
        )*
    };
}

impl_resource_for_pointer!(Box, Rc, Arc);

impl<T: Resource + ?Sized> Resource for &T {
    #[inline]
    fn visit_fields(&self, visitor: &mut dyn FieldVisitor) -> Result<()> {
        (**self).visit_fields(visitor)
    }
}

// -----------------------------------------------------------------------------
// Relation

/// The resources a relationship field points at.
pub enum Related<'a> {
    /// A to-one link, `None` when unset.
    One(Option<&'a dyn Resource>),
    /// A to-many link.
    Many(Vec<&'a dyn Resource>),
}

/// A field holding related resources.
///
/// `Option<T>` is a to-one link and `Vec<T>` a to-many link. Both accept any
/// `T: Resource`, including `Box<T>` and `Rc<T>`.
pub trait Relation {
    fn related(&self) -> Related<'_>;
}

impl<T: Resource> Relation for Option<T> {
    #[inline]
    fn related(&self) -> Related<'_> {
        Related::One(self.as_ref().map(|model| model as &dyn Resource))
    }
}

impl<T: Resource> Relation for Vec<T> {
    fn related(&self) -> Related<'_> {
        Related::Many(self.iter().map(|model| model as &dyn Resource).collect())
    }
}

impl<T: Resource> Relation for [T] {
    fn related(&self) -> Related<'_> {
        Related::Many(self.iter().map(|model| model as &dyn Resource).collect())
    }
}

impl<T: Relation + ?Sized> Relation for &T {
    #[inline]
    fn related(&self) -> Related<'_> {
        (**self).related()
    }
}
