//! Migration runner with version tracking on a `:SchemaVersion` node.

use crate::error::AppError;
use crate::graph::{CypherExecutor, QueryExt};
use crate::migrations::{create_register, MigrationResult};

/// Run all pending migrations.
pub async fn run_migrations(graph: &dyn CypherExecutor) -> Result<MigrationResult, AppError> {
    ensure_schema_version(graph).await?;

    let previous_version = get_schema_version(graph).await?;
    let register = create_register();

    let (current_version, applied_migrations) = register
        .run_pending(graph, previous_version, |version, id| {
            update_schema_version(graph, version, id)
        })
        .await?;

    Ok(MigrationResult {
        previous_version,
        current_version,
        applied_migrations,
    })
}

async fn ensure_schema_version(graph: &dyn CypherExecutor) -> Result<(), AppError> {
    let now = chrono::Utc::now().to_rfc3339();
    graph
        .query(
            "MERGE (sv:SchemaVersion {id: 'schema_version'})
             ON CREATE SET sv.version = 0, sv.applied_migrations = [], sv.created_at = $now",
        )
        .param("now", &now)
        .run()
        .await
}

async fn get_schema_version(graph: &dyn CypherExecutor) -> Result<u32, AppError> {
    let row = graph
        .query("MATCH (sv:SchemaVersion {id: 'schema_version'}) RETURN sv.version AS version")
        .fetch_one()
        .await?;

    Ok(row
        .and_then(|r| r.get::<i64>("version").ok())
        .unwrap_or(0) as u32)
}

async fn update_schema_version(
    graph: &dyn CypherExecutor,
    version: u32,
    migration_id: &'static str,
) -> Result<(), AppError> {
    let now = chrono::Utc::now().to_rfc3339();
    graph
        .query(
            "MATCH (sv:SchemaVersion {id: 'schema_version'})
             SET sv.version = $version, sv.applied_migrations = sv.applied_migrations + [$migration_id], sv.last_applied_at = $now",
        )
        .param("version", version as i64)
        .param("migration_id", migration_id)
        .param("now", &now)
        .run()
        .await
}
