//! Unique constraints backing idempotent creation.

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::AppError;
use crate::graph::{CypherExecutor, QueryExt};
use crate::migrations::Migration;
use crate::models::ModelKind;

/// Unique `name` per concrete kind and unique `node_id` across all nodes.
pub struct M001Constraints;

impl M001Constraints {
    /// Constraint statements in creation order.
    pub fn statements() -> Vec<String> {
        let mut statements: Vec<String> = ModelKind::LEAVES
            .iter()
            .map(|kind| {
                format!(
                    "CREATE CONSTRAINT {}_name_unique IF NOT EXISTS \
                     FOR (n:{}) REQUIRE n.name IS UNIQUE",
                    kind.label().to_lowercase(),
                    kind.label()
                )
            })
            .collect();

        statements.push(
            "CREATE CONSTRAINT entity_node_id_unique IF NOT EXISTS \
             FOR (n:Entity) REQUIRE n.node_id IS UNIQUE"
                .to_string(),
        );
        statements
    }
}

impl Migration for M001Constraints {
    fn id(&self) -> &'static str {
        "m001_constraints"
    }

    fn version(&self) -> u32 {
        1
    }

    fn description(&self) -> &'static str {
        "Unique name per kind and unique node_id"
    }

    fn up<'a>(&'a self, graph: &'a dyn CypherExecutor) -> BoxFuture<'a, Result<(), AppError>> {
        async move {
            for statement in Self::statements() {
                graph.query(&statement).run().await?;
            }
            Ok(())
        }
        .boxed()
    }
}
