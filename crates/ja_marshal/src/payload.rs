use alloc::string::String;
use alloc::vec::Vec;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Included, Node};

/// Document with a single primary resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnePayload {
    pub data: Node,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

impl OnePayload {
    /// A document without `included` and `meta`.
    #[inline]
    pub fn new(data: Node) -> Self {
        Self::assemble(data, Included::new(), None)
    }

    pub fn assemble(data: Node, included: Included, meta: Option<Map<String, Value>>) -> Self {
        Self {
            data,
            included: included.into_vec(),
            meta,
        }
    }
}

/// Document with a list of primary resources.
///
/// `data` is always serialized, as `[]` when there are no roots.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ManyPayload {
    pub data: Vec<Node>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

impl ManyPayload {
    pub fn assemble(data: Vec<Node>, included: Included, meta: Option<Map<String, Value>>) -> Self {
        Self {
            data,
            included: included.into_vec(),
            meta,
        }
    }
}
