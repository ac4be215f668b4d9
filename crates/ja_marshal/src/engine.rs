use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use ja_tag::{FieldSpec, Role, TagError};
use serde_json::Value;

use crate::attribute::encode_attribute;
use crate::{Field, FieldVisitor, Included, Linkage, MarshalError, Node};
use crate::{Related, Relationship, Resource, Result};

// -----------------------------------------------------------------------------
// Configuration

/// Where related resources end up.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Linkage holds `type`/`id` only, the full nodes go to `included`.
    #[default]
    Sideload,
    /// Linkage holds the full nodes, `included` is never written.
    Embedded,
}

/// Turns resources into [`Node`] trees.
///
/// The default configuration sideloads relationships and puts no bound on
/// their depth. A cyclic object graph never terminates unless a limit is set
/// with [`max_depth`](Self::max_depth).
///
/// ```
/// use ja_marshal::{Included, Marshaler, Resource};
///
/// #[derive(Resource)]
/// struct Folder {
///     #[jsonapi("primary,folders")]
///     id: u32,
///     #[jsonapi("relation,children")]
///     children: Vec<Folder>,
/// }
///
/// let tree = Folder {
///     id: 1,
///     children: vec![Folder { id: 2, children: vec![Folder { id: 3, children: vec![] }] }],
/// };
///
/// let mut included = Included::new();
/// assert!(Marshaler::new().max_depth(2).node(&tree, &mut included).is_ok());
/// assert!(Marshaler::new().max_depth(1).node(&tree, &mut Included::new()).is_err());
/// assert_eq!(included.len(), 2);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Marshaler {
    mode: Mode,
    max_depth: Option<usize>,
}

impl Marshaler {
    /// Sideload mode, unbounded depth.
    #[inline]
    pub const fn new() -> Self {
        Self {
            mode: Mode::Sideload,
            max_depth: None,
        }
    }

    /// Embedded mode, unbounded depth.
    #[inline]
    pub const fn embedded() -> Self {
        Self::new().with_mode(Mode::Embedded)
    }

    #[inline]
    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Fails with [`MarshalError::DepthExceeded`] when a related resource
    /// sits more than `depth` links away from the root.
    #[inline]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    #[inline]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub const fn depth_limit(&self) -> Option<usize> {
        self.max_depth
    }

    /// Builds the node of `model`.
    ///
    /// In sideload mode every reachable related resource is added to
    /// `included`. In embedded mode `included` is left untouched.
    pub fn node<R: Resource + ?Sized>(&self, model: &R, included: &mut Included) -> Result<Node> {
        self.visit(&model, included, 0)
    }

    /// Builds the nodes of `models` in order, sharing one `included`.
    pub fn nodes<R: Resource>(&self, models: &[R], included: &mut Included) -> Result<Vec<Node>> {
        models
            .iter()
            .map(|model| self.visit(model, included, 0))
            .collect()
    }

    fn visit(&self, model: &dyn Resource, included: &mut Included, depth: usize) -> Result<Node> {
        if let Some(limit) = self.max_depth
            && depth > limit
        {
            log::warn!("relationship depth exceeds the limit of {limit}, aborting.");
            return Err(MarshalError::DepthExceeded(limit));
        }

        let mut visitor = NodeBuilder {
            marshaler: self,
            included,
            depth,
            node: Node::default(),
        };
        model.visit_fields(&mut visitor)?;

        let node = visitor.node;
        log::trace!("built node {}:{} at depth {depth}", node.resource_type, node.id);
        Ok(node)
    }
}

// -----------------------------------------------------------------------------
// Visitor

struct NodeBuilder<'a> {
    marshaler: &'a Marshaler,
    included: &'a mut Included,
    depth: usize,
    node: Node,
}

impl NodeBuilder<'_> {
    fn visit_relation(&mut self, spec: &FieldSpec<'_>, related: Related<'_>) -> Result<()> {
        let data = match related {
            Related::One(None) => return Ok(()),
            Related::Many(models) if models.is_empty() => return Ok(()),
            Related::One(Some(model)) => Linkage::One(Box::new(self.link(model)?)),
            Related::Many(models) => Linkage::Many(
                models
                    .into_iter()
                    .map(|model| self.link(model))
                    .collect::<Result<_>>()?,
            ),
        };

        self.node
            .relationships
            .insert(spec.name.to_string(), Relationship { data });
        Ok(())
    }

    fn link(&mut self, model: &dyn Resource) -> Result<Node> {
        let node = self.marshaler.visit(model, self.included, self.depth + 1)?;

        match self.marshaler.mode {
            Mode::Embedded => Ok(node),
            Mode::Sideload => {
                let shallow = node.shallow();
                self.included.insert(node);
                Ok(shallow)
            }
        }
    }
}

impl FieldVisitor for NodeBuilder<'_> {
    fn visit_field(&mut self, spec: &FieldSpec<'_>, field: Field<'_>) -> Result<()> {
        match (spec.role, field) {
            (Role::Primary, Field::Id(value)) => {
                self.node.id = primary_key(value)?;
                self.node.resource_type = spec.name.to_string();
            }
            (Role::ClientId, Field::ClientId(value)) => {
                if !value.is_empty() {
                    self.node.client_id = Some(value.to_string());
                }
            }
            (Role::Attribute, Field::Attribute(value)) => {
                if let Some(value) = encode_attribute(spec, value)? {
                    self.node.attributes.insert(spec.name.to_string(), value);
                }
            }
            (Role::Relation, Field::Relation(value)) => {
                self.visit_relation(spec, value.related())?;
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

/// Renders a primary key value as its decimal or literal string.
fn primary_key(value: &dyn erased_serde::Serialize) -> Result<String> {
    let value = serde_json::to_value(value).map_err(|_| MarshalError::BadPrimaryKeyType {
        found: "unserializable value",
    })?;

    match value {
        Value::String(id) => Ok(id),
        Value::Number(num) if num.is_i64() || num.is_u64() => Ok(num.to_string()),
        other => Err(MarshalError::BadPrimaryKeyType {
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "floating point number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "map",
    }
}
