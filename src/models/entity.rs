//! Entity model: the identity every catalog node shares.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// A named node in the catalog graph.
///
/// This is also the bare serialization used for relationship targets
/// (companies, genres, categories, DLCs listed under `connections`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Display name, unique per concrete kind.
    pub name: String,
    /// Identifier assigned once at creation (ULID).
    pub node_id: String,
}

/// Generates a new node identifier.
pub fn generate_node_id() -> String {
    Ulid::new().to_string()
}
