//! Scripted executor for unit tests.
//!
//! Replays canned responses in call order and records every statement it
//! receives, so services can be tested without a running database.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::graph::row::{Params, Row, RowStream};
use crate::graph::traits::CypherExecutor;

/// A statement received by [`ScriptedExecutor`].
#[derive(Debug, Clone)]
pub struct Call {
    pub cypher: String,
    pub params: Params,
}

impl Call {
    /// Returns a bound parameter, panicking if it is absent.
    pub fn param(&self, name: &str) -> &JsonValue {
        self.params
            .get(name)
            .unwrap_or_else(|| panic!("parameter '{}' not bound in: {}", name, self.cypher))
    }
}

/// Executor returning scripted responses in FIFO order.
///
/// Once the script is exhausted every further call yields no rows.
#[derive(Default)]
pub struct ScriptedExecutor {
    responses: Mutex<VecDeque<Result<Vec<Row>, AppError>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues rows for the next call.
    pub fn then_rows(self, rows: Vec<Row>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(rows));
        self
    }

    /// Queues an empty result for the next call.
    pub fn then_empty(self) -> Self {
        self.then_rows(Vec::new())
    }

    /// Queues an error for the next call.
    pub fn then_error(self, err: AppError) -> Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    /// All statements received so far.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn next_response(&self, cypher: &str, params: Params) -> Result<Vec<Row>, AppError> {
        self.calls.lock().unwrap().push(Call {
            cypher: cypher.to_string(),
            params,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[async_trait::async_trait]
impl CypherExecutor for ScriptedExecutor {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        let rows = self.next_response(cypher, params)?;
        Ok(Box::pin(futures::stream::iter(rows.into_iter().map(Ok))))
    }

    async fn run_cypher(&self, cypher: &str, params: Params) -> Result<(), AppError> {
        self.next_response(cypher, params).map(|_| ())
    }
}

/// Builds a row from a JSON object literal.
pub fn row(value: JsonValue) -> Row {
    match value {
        JsonValue::Object(map) => Row::new(map.into_iter().collect()),
        other => panic!("row literal must be an object, got {}", other),
    }
}
