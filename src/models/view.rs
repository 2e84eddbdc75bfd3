//! Serialized shapes returned by the HTTP surface.

use serde::{Deserialize, Serialize};

use super::kind::Relation;
use super::Entity;

/// Relationship targets of a node, keyed by relationship.
///
/// Only the relationships of the node's kind are present; absent ones
/// are omitted from the output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Connections {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<Entity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Entity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developers: Option<Vec<Entity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publishers: Option<Vec<Entity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dlcs: Option<Vec<Entity>>,
}

impl Connections {
    /// Stores the targets of one relationship.
    pub fn set(&mut self, relation: Relation, targets: Vec<Entity>) {
        let slot = match relation {
            Relation::Genre => &mut self.genres,
            Relation::Category => &mut self.categories,
            Relation::Developer => &mut self.developers,
            Relation::Publisher => &mut self.publishers,
            Relation::Dlc => &mut self.dlcs,
        };
        *slot = Some(targets);
    }
}

/// A node with its fields flattened, plus optional `connections`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView<T> {
    #[serde(flatten)]
    pub node: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections: Option<Connections>,
}

impl<T> NodeView<T> {
    pub fn with_connections(node: T, connections: Connections) -> Self {
        Self {
            node,
            connections: Some(connections),
        }
    }
}
