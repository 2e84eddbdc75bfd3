//! Migration trait and registry.

use futures::future::BoxFuture;

use crate::error::AppError;
use crate::graph::CypherExecutor;

/// A forward-only schema migration.
///
/// Uses `BoxFuture` so the trait stays object safe without `'static`
/// requirements on the executor.
pub trait Migration: Send + Sync {
    fn id(&self) -> &'static str;
    fn version(&self) -> u32;
    fn description(&self) -> &'static str;
    fn up<'a>(&'a self, graph: &'a dyn CypherExecutor) -> BoxFuture<'a, Result<(), AppError>>;
}

/// Ordered set of migrations.
#[derive(Default)]
pub struct Register {
    migrations: Vec<Box<dyn Migration>>,
}

impl Register {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, migration: impl Migration + 'static) -> Self {
        self.migrations.push(Box::new(migration));
        self
    }

    /// Run every migration above `current_version`, in order.
    ///
    /// `on_applied` is called after each migration so the caller can record
    /// progress before the next one starts.
    /// Returns (new_version, applied_migration_ids).
    pub async fn run_pending<F, Fut>(
        &self,
        graph: &dyn CypherExecutor,
        current_version: u32,
        mut on_applied: F,
    ) -> Result<(u32, Vec<String>), AppError>
    where
        F: FnMut(u32, &'static str) -> Fut,
        Fut: std::future::Future<Output = Result<(), AppError>>,
    {
        let mut applied = vec![];
        let mut new_version = current_version;

        for migration in &self.migrations {
            if migration.version() <= current_version {
                continue;
            }

            tracing::info!(
                "Applying migration {} (v{}): {}",
                migration.id(),
                migration.version(),
                migration.description()
            );

            if let Err(e) = migration.up(graph).await {
                tracing::error!("Migration {} failed: {}", migration.id(), e);
                return Err(e);
            }
            on_applied(migration.version(), migration.id()).await?;

            new_version = migration.version();
            applied.push(migration.id().to_string());
        }

        Ok((new_version, applied))
    }
}
