#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate `ja_marshal`, which must also resolve in
// the crate's own tests.
extern crate self as ja_marshal;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod attribute;
mod engine;
mod error;
mod included;
mod marshal;
mod meta;
mod node;
mod payload;
mod resource;

pub mod time;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports {
    pub use serde_json::{Value, to_value};
}

pub use ja_tag as tag;
pub use ja_tag::{FieldSpec, Role, TagError};

pub use attribute::{Attribute, Timestamp};
pub use engine::{Marshaler, Mode};
pub use error::{MarshalError, Result};
pub use included::Included;
pub use meta::{Meta, encode_meta};
pub use node::{Linkage, Node, Relationship};
pub use payload::{ManyPayload, OnePayload};
pub use resource::{Field, FieldVisitor, Related, Relation, Resource};

pub use marshal::{
    marshal_many, marshal_many_dyn, marshal_many_with_meta, marshal_one, marshal_one_embedded,
    marshal_one_without_included,
};
pub use marshal::{
    write_many, write_many_with_meta, write_one, write_one_embedded, write_one_without_included,
};

#[cfg(feature = "derive")]
pub use ja_marshal_derive as derive;

/// Derives [`Resource`](trait@Resource) from `#[jsonapi("...")]` field attributes.
#[cfg(feature = "derive")]
pub use ja_marshal_derive::Resource;

/// Derives [`Meta`](trait@Meta) from `#[jsonapi("...")]` field attributes.
#[cfg(feature = "derive")]
pub use ja_marshal_derive::Meta;
