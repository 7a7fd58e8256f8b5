//! Node creation requests that wait for their node type to become available.
//!
//! A request names its type by a stable [`NodeTypeKey`]. Whoever provides the
//! type (a plugin, a freshly built script module) registers the key in a
//! [`NodeTypeRegistry`]; the queue is then resolved once. Requests whose key is
//! still unknown at that point are dropped, never retried.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier of a node inside a tree document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeTypeKey(pub String);

impl NodeTypeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeKind {
    Action,
    Condition,
    Composite,
    Decorator,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Default, Clone)]
pub struct NodeTypeRegistry {
    types: BTreeMap<NodeTypeKey, NodeKind>,
}

impl NodeTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: NodeTypeKey, kind: NodeKind) {
        self.types.insert(key, kind);
    }

    pub fn kind(&self, key: &NodeTypeKey) -> Option<NodeKind> {
        self.types.get(key).copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PendingNodeCreate {
    pub type_key: NodeTypeKey,
    /// Node the user dragged from when asking for the new type, if any.
    pub source: Option<NodeId>,
    /// Whether `source` becomes the parent of the new node (dragged from an
    /// output port) rather than its child.
    pub source_is_parent: bool,
    pub position: Position,
}

impl PendingNodeCreate {
    pub fn new(type_key: NodeTypeKey, position: Position) -> Self {
        Self {
            type_key,
            source: None,
            source_is_parent: false,
            position,
        }
    }

    pub fn from_parent(mut self, parent: NodeId) -> Self {
        self.source = Some(parent);
        self.source_is_parent = true;
        self
    }

    pub fn from_child(mut self, child: NodeId) -> Self {
        self.source = Some(child);
        self.source_is_parent = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attach {
    Detached,
    ChildOf(NodeId),
    ParentOf(NodeId),
}

/// A resolved request, ready for the graph view to instantiate and select.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateNode {
    pub type_key: NodeTypeKey,
    pub kind: NodeKind,
    pub position: Position,
    pub attach: Attach,
}

#[derive(Debug, Default)]
pub struct PendingCreates {
    queue: VecDeque<PendingNodeCreate>,
}

impl PendingCreates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, request: PendingNodeCreate) {
        self.queue.push_back(request);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drains every request. `node_exists` tells whether a source node is
    /// still present in the displayed tree; a vanished source yields a
    /// detached node.
    pub fn resolve<F>(&mut self, registry: &NodeTypeRegistry, node_exists: F) -> Vec<CreateNode>
    where
        F: Fn(&NodeId) -> bool,
    {
        let mut created = Vec::with_capacity(self.queue.len());
        for request in self.queue.drain(..) {
            let Some(kind) = registry.kind(&request.type_key) else {
                tracing::debug!(type_key = %request.type_key.0, "dropping node request for unregistered type");
                continue;
            };

            let attach = match request.source {
                Some(source) if node_exists(&source) => {
                    if request.source_is_parent {
                        Attach::ChildOf(source)
                    } else {
                        Attach::ParentOf(source)
                    }
                }
                _ => Attach::Detached,
            };

            created.push(CreateNode {
                type_key: request.type_key,
                kind,
                position: request.position,
                attach,
            });
        }
        created
    }
}
