//! Game views for the HTTP surface: list, detail and similar games.

use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::{Content, Filter, ModelKind, NodeView, OrderBy};
use crate::repositories::NodeRepository;
use crate::services::ModelService;

/// Reads games and attaches their connections.
#[derive(FromContext, Clone)]
pub struct GameService {
    models: ModelService,
    nodes: NodeRepository,
}

impl GameService {
    /// A window of games with connections, and whether more follow.
    pub async fn list(
        &self,
        start: u64,
        limit: u64,
        order_by: &OrderBy,
    ) -> Result<(Vec<NodeView<Content>>, bool), AppError> {
        let (games, has_more) = self
            .models
            .get_filtered_list(ModelKind::Game, start, Some(limit), order_by, &Filter::new())
            .await?;
        Ok((self.with_connections(games).await?, has_more))
    }

    /// A single game without connections.
    pub async fn detail(&self, node_id: &str) -> Result<Content, AppError> {
        self.models
            .get_model(ModelKind::Game, &Filter::node_id(node_id))
            .await
    }

    /// Games most similar to the one with `node_id`, with connections.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] when the base game does not exist.
    pub async fn similar(
        &self,
        node_id: &str,
        start: u64,
        limit: u64,
    ) -> Result<(Vec<NodeView<Content>>, bool), AppError> {
        let base = self.detail(node_id).await?;
        let (games, has_more) = self
            .models
            .get_similar_list(ModelKind::Game, &base.name, start, Some(limit))
            .await?;
        Ok((self.with_connections(games).await?, has_more))
    }

    async fn with_connections(
        &self,
        games: Vec<Content>,
    ) -> Result<Vec<NodeView<Content>>, AppError> {
        let node_ids: Vec<String> = games.iter().map(|g| g.node_id.clone()).collect();
        let mut connections = self.nodes.connections(ModelKind::Game, &node_ids).await?;

        Ok(games
            .into_iter()
            .map(|game| {
                let game_connections = connections.remove(&game.node_id).unwrap_or_default();
                NodeView::with_connections(game, game_connections)
            })
            .collect())
    }
}
