//! Query builder for fluent Cypher query construction.

use futures::{StreamExt, TryStreamExt};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::graph::row::{Params, Row, RowStream};
use crate::graph::traits::CypherExecutor;

/// A builder for constructing and executing Cypher queries.
///
/// `Query` provides a fluent API for adding parameters and executing
/// queries against any [`CypherExecutor`], including trait objects.
///
/// # Example
///
/// ```ignore
/// let rows = Query::new(&client, "MATCH (n:Game) WHERE n.node_id = $id RETURN n")
///     .param("id", "01J0X8YQ3S")
///     .fetch_all()
///     .await?;
/// ```
pub struct Query<'a, E: CypherExecutor + ?Sized> {
    executor: &'a E,
    cypher: String,
    params: Params,
    error: Option<AppError>,
}

impl<'a, E: CypherExecutor + ?Sized> Query<'a, E> {
    /// Creates a new query builder.
    pub fn new(executor: &'a E, cypher: &str) -> Self {
        Self {
            executor,
            cypher: cypher.to_string(),
            params: Params::new(),
            error: None,
        }
    }

    /// Adds a parameter to the query.
    ///
    /// Parameters are referenced in Cypher using `$name` syntax. A value
    /// that fails to serialize is reported when the query executes.
    pub fn param<T: Serialize>(mut self, name: &str, value: T) -> Self {
        match serde_json::to_value(value) {
            Ok(json_value) => {
                self.params.insert(name.to_string(), json_value);
            }
            Err(e) => {
                self.error.get_or_insert(AppError::Internal(format!(
                    "failed to serialize parameter '{}': {}",
                    name, e
                )));
            }
        }
        self
    }

    /// Adds a parameter that's already a JSON value.
    pub fn param_raw(mut self, name: &str, value: JsonValue) -> Self {
        self.params.insert(name.to_string(), value);
        self
    }

    /// Adds every entry of a prepared parameter map.
    pub fn params(mut self, params: Params) -> Self {
        self.params.extend(params);
        self
    }

    /// Executes the query and returns a stream of rows.
    pub async fn execute(self) -> Result<RowStream<'a>, AppError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        tracing::debug!(cypher = %self.cypher, "executing query");
        self.executor
            .execute_cypher(&self.cypher, self.params)
            .await
    }

    /// Executes the query and collects all rows into a vector.
    pub async fn fetch_all(self) -> Result<Vec<Row>, AppError> {
        self.execute().await?.try_collect().await
    }

    /// Executes the query and returns the first row, if any.
    pub async fn fetch_one(self) -> Result<Option<Row>, AppError> {
        let mut stream = self.execute().await?;
        stream.next().await.transpose()
    }

    /// Executes the query without returning results.
    pub async fn run(self) -> Result<(), AppError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        tracing::debug!(cypher = %self.cypher, "running statement");
        self.executor.run_cypher(&self.cypher, self.params).await
    }
}

/// Extension trait providing a convenient `query()` method.
///
/// Implemented for every [`CypherExecutor`], sized or not, so both a
/// concrete client and an `Arc<dyn CypherExecutor>` can write
/// `executor.query("...")`.
pub trait QueryExt: CypherExecutor {
    /// Creates a new query builder for this executor.
    fn query(&self, cypher: &str) -> Query<'_, Self> {
        Query::new(self, cypher)
    }
}

impl<E: CypherExecutor + ?Sized> QueryExt for E {}
