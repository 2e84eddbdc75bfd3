//! Application context providing dependency injection root.

use std::sync::Arc;

use crate::config::Config;
use crate::di::Context as ContextDerive;
use crate::graph::CypherExecutor;

/// Shared handle to the graph backend.
pub type AppGraph = Arc<dyn CypherExecutor>;

/// Root application context for dependency injection.
///
/// The Context holds all shared dependencies and uses `#[derive(Context)]`
/// to generate `FromRef` implementations for each field, so repositories and
/// services resolve their fields at compile time.
#[derive(ContextDerive, Clone)]
pub struct Context {
    /// Graph database executor.
    pub graph: AppGraph,
    /// Application configuration.
    pub config: Arc<Config>,
}

impl Context {
    /// Creates a new context with the given dependencies.
    pub fn new(graph: impl CypherExecutor + 'static, config: Config) -> Self {
        Self {
            graph: Arc::new(graph),
            config: Arc::new(config),
        }
    }
}
