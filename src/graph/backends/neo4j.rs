//! Neo4j backend over the Bolt protocol.
//!
//! # Example
//!
//! ```ignore
//! use game_catalog::graph::backends::neo4j::Neo4jClient;
//! use game_catalog::graph::QueryExt;
//!
//! let client = Neo4jClient::connect("localhost:7687", "neo4j", "password").await?;
//!
//! let rows = client.query("MATCH (n:Game) RETURN n { .* } AS n")
//!     .fetch_all()
//!     .await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use neo4rs::{BoltBoolean, BoltFloat, BoltInteger, BoltList, BoltMap, BoltNull, BoltString, BoltType};
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::graph::row::{Params, Row, RowStream};
use crate::graph::traits::CypherExecutor;

/// Marker Neo4j puts in the error code of a unique constraint violation.
const CONSTRAINT_VIOLATION_CODE: &str = "ConstraintValidationFailed";

/// Neo4j graph client.
///
/// Wraps the `neo4rs` connection pool; cheap to clone.
#[derive(Clone)]
pub struct Neo4jClient {
    graph: Arc<neo4rs::Graph>,
}

impl Neo4jClient {
    /// Connects to Neo4j.
    ///
    /// # Arguments
    ///
    /// * `address` - Bolt address, with or without scheme (e.g. `localhost:7687`)
    /// * `user` - Database user
    /// * `password` - Database password
    pub async fn connect(address: &str, user: &str, password: &str) -> Result<Self, AppError> {
        let graph = neo4rs::Graph::new(address, user, password).await?;
        Ok(Self {
            graph: Arc::new(graph),
        })
    }

    fn build_query(cypher: &str, params: Params) -> neo4rs::Query {
        params
            .into_iter()
            .fold(neo4rs::query(cypher), |query, (name, value)| {
                query.param(&name, json_to_bolt(value))
            })
    }
}

#[async_trait]
impl CypherExecutor for Neo4jClient {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        use async_stream::try_stream;

        let query = Self::build_query(cypher, params);
        let mut result = self
            .graph
            .execute(query)
            .await
            .map_err(|e| query_error(e, cypher))?;
        let cypher = cypher.to_string();

        Ok(Box::pin(try_stream! {
            while let Some(row) = result.next().await.map_err(|e| query_error(e, &cypher))? {
                yield parse_neo4j_row(&row)?;
            }
        }))
    }

    async fn run_cypher(&self, cypher: &str, params: Params) -> Result<(), AppError> {
        let query = Self::build_query(cypher, params);
        self.graph
            .run(query)
            .await
            .map_err(|e| query_error(e, cypher))
    }
}

/// Maps a driver error, singling out unique constraint violations so that
/// callers can converge on the existing node.
fn query_error(err: neo4rs::Error, cypher: &str) -> AppError {
    let message = err.to_string();
    if message.contains(CONSTRAINT_VIOLATION_CODE) {
        return AppError::ConstraintViolation(message);
    }
    AppError::Query {
        message: format!("Cypher query failed: {}", message),
        query: cypher.to_string(),
    }
}

/// Converts a `neo4rs` row into our generic JSON row.
fn parse_neo4j_row(row: &neo4rs::Row) -> Result<Row, AppError> {
    let data: HashMap<String, JsonValue> = row
        .to()
        .map_err(|e| AppError::Internal(format!("Failed to decode row: {}", e)))?;
    Ok(Row::new(data))
}

/// Converts a JSON parameter into its Bolt equivalent.
fn json_to_bolt(value: JsonValue) -> BoltType {
    match value {
        JsonValue::Null => BoltType::Null(BoltNull),
        JsonValue::Bool(b) => BoltType::Boolean(BoltBoolean::new(b)),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => BoltType::Integer(BoltInteger::new(i)),
            None => BoltType::Float(BoltFloat::new(n.as_f64().unwrap_or_default())),
        },
        JsonValue::String(s) => BoltType::String(BoltString::from(s)),
        JsonValue::Array(items) => BoltType::List(BoltList::from(
            items.into_iter().map(json_to_bolt).collect::<Vec<_>>(),
        )),
        JsonValue::Object(map) => {
            let mut bolt = BoltMap::new();
            for (key, value) in map {
                bolt.put(BoltString::from(key), json_to_bolt(value));
            }
            BoltType::Map(bolt)
        }
    }
}
