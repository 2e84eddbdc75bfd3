//! Core trait for graph database access.
//!
//! Every backend implements [`CypherExecutor`]. The catalog issues one
//! auto-committed statement per call, so there is no transaction trait.

use async_trait::async_trait;

use crate::error::AppError;
use crate::graph::row::{Params, RowStream};

/// Executes Cypher queries against a graph database.
///
/// The trait is object safe so the application context can hold an
/// `Arc<dyn CypherExecutor>` and tests can swap in a scripted executor.
#[async_trait]
pub trait CypherExecutor: Send + Sync {
    /// Executes a Cypher query and returns a stream of result rows.
    ///
    /// Use this for queries that return data (MATCH, RETURN).
    ///
    /// # Arguments
    ///
    /// * `cypher` - The Cypher query string
    /// * `params` - Parameters to bind to the query
    async fn execute_cypher(&self, cypher: &str, params: Params)
        -> Result<RowStream<'_>, AppError>;

    /// Executes a Cypher query without returning results.
    ///
    /// Use this for mutations (CREATE, MERGE, DELETE, SET) and schema
    /// statements.
    async fn run_cypher(&self, cypher: &str, params: Params) -> Result<(), AppError>;
}
