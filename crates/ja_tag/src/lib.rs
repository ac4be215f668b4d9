#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod spec;

// -----------------------------------------------------------------------------
// Exports

pub use error::TagError;
pub use spec::{FieldSpec, Role};
pub use spec::{CLIENT_ID, OMIT_EMPTY, SEPARATOR};
