//! Lookup index on `Entity.name`.

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::AppError;
use crate::graph::{CypherExecutor, QueryExt};
use crate::migrations::Migration;

/// Name lookups through ancestor labels (`Entity`, `Content`).
pub struct M002Indexes;

impl Migration for M002Indexes {
    fn id(&self) -> &'static str {
        "m002_indexes"
    }

    fn version(&self) -> u32 {
        2
    }

    fn description(&self) -> &'static str {
        "Name indexes on ancestor labels"
    }

    fn up<'a>(&'a self, graph: &'a dyn CypherExecutor) -> BoxFuture<'a, Result<(), AppError>> {
        async move {
            graph
                .query("CREATE INDEX entity_name IF NOT EXISTS FOR (n:Entity) ON (n.name)")
                .run()
                .await?;
            graph
                .query("CREATE INDEX content_name IF NOT EXISTS FOR (n:Content) ON (n.name)")
                .run()
                .await?;
            Ok(())
        }
        .boxed()
    }
}
