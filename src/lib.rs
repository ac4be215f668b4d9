#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use ja_marshal as marshal;
pub use ja_tag as tag;
