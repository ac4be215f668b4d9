use alloc::string::String;
use alloc::vec::Vec;
use core::slice;

use foldhash::fast::FixedState;
use hashbrown::{Equivalent, HashSet};

use crate::Node;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ResourceKey {
    resource_type: String,
    id: String,
}

#[derive(Hash)]
struct ResourceKeyRef<'a> {
    resource_type: &'a str,
    id: &'a str,
}

impl Equivalent<ResourceKey> for ResourceKeyRef<'_> {
    #[inline]
    fn equivalent(&self, key: &ResourceKey) -> bool {
        self.resource_type == key.resource_type && self.id == key.id
    }
}

/// The `included` section of a document under construction.
///
/// Holds one node per `(type, id)` pair. The first node inserted for a pair
/// is kept and later ones are dropped, iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct Included {
    nodes: Vec<Node>,
    keys: HashSet<ResourceKey, FixedState>,
}

impl Included {
    /// Creates an empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `node` unless a node with the same type and id is present.
    ///
    /// Returns whether the node was added.
    pub fn insert(&mut self, node: Node) -> bool {
        if self.contains(&node.resource_type, &node.id) {
            log::trace!("coalesced duplicate included resource {}:{}", node.resource_type, node.id);
            return false;
        }
        self.keys.insert(ResourceKey {
            resource_type: node.resource_type.clone(),
            id: node.id.clone(),
        });
        self.nodes.push(node);
        true
    }

    /// Whether a node with this type and id is present.
    pub fn contains(&self, resource_type: &str, id: &str) -> bool {
        self.keys.contains(&ResourceKeyRef { resource_type, id })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Consumes the accumulator, returning nodes in insertion order.
    #[inline]
    pub fn into_vec(self) -> Vec<Node> {
        self.nodes
    }
}

impl IntoIterator for Included {
    type Item = Node;
    type IntoIter = alloc::vec::IntoIter<Node>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Included {
    type Item = &'a Node;
    type IntoIter = slice::Iter<'a, Node>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl Extend<Node> for Included {
    fn extend<I: IntoIterator<Item = Node>>(&mut self, iter: I) {
        iter.into_iter().for_each(|node| {
            self.insert(node);
        });
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use serde_json::json;

    use super::Included;
    use crate::Node;

    #[test]
    fn first_insert_wins() {
        let mut included = Included::new();
        let mut first = Node::new("animals", "1");
        first.attributes.insert("name".into(), json!("Rex"));

        assert!(included.insert(first));
        assert!(!included.insert(Node::new("animals", "1")));
        assert!(included.insert(Node::new("people", "1")));

        assert_eq!(included.len(), 2);
        assert!(included.contains("animals", "1"));
        assert!(!included.contains("animals", "2"));

        let nodes = included.into_vec();
        assert_eq!(nodes[0].attribute("name"), Some(&json!("Rex")));
        assert_eq!(nodes[1].resource_type, "people");
    }

    #[test]
    fn extend_keeps_order() {
        let mut included = Included::new();
        included.extend(["3", "1", "3", "2"].map(|id| Node::new("tags", id)));

        let ids: Vec<_> = included.iter().map(|node| node.id.as_str()).collect();
        assert_eq!(ids, ["3", "1", "2"]);
    }
}
