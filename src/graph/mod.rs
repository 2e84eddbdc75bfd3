//! Graph abstraction layer for backend-agnostic database access.
//!
//! Application code talks to the database through [`CypherExecutor`],
//! usually via the fluent [`Query`] builder:
//!
//! ```ignore
//! use game_catalog::graph::QueryExt;
//!
//! // Query with parameters
//! let rows = graph.query("MATCH (n:Game) WHERE n.node_id = $id RETURN n { .* } AS n")
//!     .param("id", node_id)
//!     .fetch_all()
//!     .await?;
//!
//! // Write query (no results)
//! graph.query("MATCH (n:Genre {name: $name}) DETACH DELETE n")
//!     .param("name", "Puzzle")
//!     .run()
//!     .await?;
//! ```

mod query;
mod row;
mod traits;

pub mod backends;

#[cfg(test)]
pub(crate) mod testing;

pub use query::{Query, QueryExt};
pub use row::{Params, Row, RowStream};
pub use traits::CypherExecutor;
