use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use serde::Serialize;
use serde_json::{Map, Value};

// -----------------------------------------------------------------------------
// Node

/// A resource object of the output document.
///
/// Empty `id`, `client-id`, `attributes` and `relationships` are left out of
/// the JSON. A node appearing as relationship linkage in sideload mode is
/// [shallow](Node::shallow): it keeps only `type` and `id`.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "client-id", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, Relationship>,
}

impl Node {
    /// Creates a node with only a type and an id.
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
            ..Default::default()
        }
    }

    /// Returns the resource identifier of this node.
    #[inline]
    pub fn shallow(&self) -> Self {
        Self::new(self.resource_type.clone(), self.id.clone())
    }

    /// Looks up an attribute by name.
    #[inline]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Looks up a relationship's linkage by name.
    #[inline]
    pub fn relationship(&self, name: &str) -> Option<&Linkage> {
        self.relationships.get(name).map(|rel| &rel.data)
    }
}

// -----------------------------------------------------------------------------
// Relationship

/// Entry of [`Node::relationships`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relationship {
    pub data: Linkage,
}

/// Target of a relationship.
///
/// Serialized as a single object for to-one links and as an array for
/// to-many links.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Linkage {
    One(Box<Node>),
    Many(Vec<Node>),
}

impl Linkage {
    /// All linked nodes, in order.
    pub fn nodes(&self) -> &[Node] {
        match self {
            Linkage::One(node) => core::slice::from_ref(node),
            Linkage::Many(nodes) => nodes,
        }
    }
}
