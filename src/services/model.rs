//! Model access service: generic get/list/create/delete over every model
//! kind plus similarity ranking.

use serde::de::DeserializeOwned;
use serde_json::{json, Map as JsonMap, Value as JsonValue};

use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::{
    generate_node_id, Entity, Filter, ModelInput, ModelKind, NewContent, NewEntity, NewGame,
    OrderBy, Relation,
};
use crate::repositories::NodeRepository;

/// Service for reading and writing catalog nodes.
#[derive(FromContext, Clone)]
pub struct ModelService {
    nodes: NodeRepository,
}

impl ModelService {
    /// Get the single instance of `kind` matching `filter`.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] when nothing matches.
    pub async fn get_model<T: DeserializeOwned>(
        &self,
        kind: ModelKind,
        filter: &Filter,
    ) -> Result<T, AppError> {
        self.nodes
            .find_one(kind, filter)
            .await?
            .ok_or_else(|| AppError::not_found(kind, filter))
    }

    /// List instances of `kind` matching `filter`, returning the window
    /// `[start, start + limit)` and whether more instances follow it.
    ///
    /// A `limit` of `None` or zero returns everything from `start` on.
    pub async fn get_filtered_list<T: DeserializeOwned>(
        &self,
        kind: ModelKind,
        start: u64,
        limit: Option<u64>,
        order_by: &OrderBy,
        filter: &Filter,
    ) -> Result<(Vec<T>, bool), AppError> {
        match limit.filter(|&limit| limit > 0) {
            None => {
                let items = self.nodes.list(kind, filter, order_by, start, None).await?;
                Ok((items, false))
            }
            Some(limit) => {
                let total = self.nodes.count(kind, filter).await?;
                let items = self
                    .nodes
                    .list(kind, filter, order_by, start, Some(limit))
                    .await?;
                Ok((items, start.saturating_add(limit) < total))
            }
        }
    }

    /// Create an instance of `kind`, or return the existing one with the
    /// same name.
    ///
    /// Relationship targets named in the input are upserted and linked
    /// even when the instance already existed.
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidArguments`] when the input does not belong to
    /// the kind's creation strategy.
    pub async fn create_model(
        &self,
        kind: ModelKind,
        input: impl Into<ModelInput>,
    ) -> Result<Entity, AppError> {
        let input = input.into();
        if input.strategy() != kind.strategy() {
            return Err(AppError::invalid_arguments(
                kind,
                format!(
                    "expected {:?} input for '{}', got {:?}",
                    kind.strategy(),
                    input.name(),
                    input.strategy()
                ),
            ));
        }
        tracing::debug!(%kind, name = input.name(), "creating model");

        match input {
            ModelInput::Entity(input) => self.create_entity(kind, &input).await,
            ModelInput::Content(input) => self.create_content(kind, &input).await,
            ModelInput::Game(input) => self.create_game(&input).await,
        }
    }

    /// Create from a kind name and untyped fields.
    ///
    /// # Errors
    ///
    /// [`AppError::NotImplemented`] for an unknown kind name and
    /// [`AppError::InvalidArguments`] for missing or unexpected fields.
    pub async fn create_from_value(
        &self,
        kind_name: &str,
        fields: JsonValue,
    ) -> Result<Entity, AppError> {
        let kind: ModelKind = kind_name.parse()?;
        let input = ModelInput::from_value(kind, fields)?;
        self.create_model(kind, input).await
    }

    /// Delete the instance of `kind` named `name`, if there is one.
    pub async fn delete_model(&self, kind: ModelKind, name: &str) -> Result<(), AppError> {
        tracing::debug!(%kind, name, "deleting model");
        self.nodes.delete(kind, &Filter::name(name)).await
    }

    /// Instances of `kind` sharing neighbours with the one named `name`,
    /// most shared first, and whether another window follows.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] when the base instance does not exist.
    pub async fn get_similar_list<T: DeserializeOwned>(
        &self,
        kind: ModelKind,
        name: &str,
        start: u64,
        limit: Option<u64>,
    ) -> Result<(Vec<T>, bool), AppError> {
        let base: Entity = self.get_model(kind, &Filter::name(name)).await?;

        match limit.filter(|&limit| limit > 0) {
            None => {
                let items = self.nodes.similar(kind, &base.node_id, start, None).await?;
                Ok((items, false))
            }
            Some(limit) => {
                let items = self
                    .nodes
                    .similar(kind, &base.node_id, start, Some(limit))
                    .await?;
                let next: Vec<Entity> = self
                    .nodes
                    .similar(kind, &base.node_id, start.saturating_add(limit), Some(1))
                    .await?;
                Ok((items, !next.is_empty()))
            }
        }
    }

    /// Find by name, else create with `properties`.
    ///
    /// Losing a creation race to the unique constraint falls back to the
    /// winner's node.
    async fn upsert(
        &self,
        kind: ModelKind,
        name: &str,
        mut properties: JsonMap<String, JsonValue>,
    ) -> Result<Entity, AppError> {
        let filter = Filter::name(name);
        if let Some(existing) = self.nodes.find_one(kind, &filter).await? {
            return Ok(existing);
        }

        properties.insert("name".to_string(), json!(name));
        properties.insert("node_id".to_string(), json!(generate_node_id()));

        match self.nodes.create(kind, properties).await {
            Ok(created) => {
                tracing::debug!(%kind, name, node_id = %created.node_id, "created model");
                Ok(created)
            }
            Err(AppError::ConstraintViolation(message)) => {
                tracing::debug!(%kind, name, "lost creation race, fetching existing");
                self.nodes
                    .find_one(kind, &filter)
                    .await?
                    .ok_or(AppError::ConstraintViolation(message))
            }
            Err(e) => Err(e),
        }
    }

    async fn create_entity(&self, kind: ModelKind, input: &NewEntity) -> Result<Entity, AppError> {
        self.upsert(kind, &input.name, JsonMap::new()).await
    }

    async fn create_content(
        &self,
        kind: ModelKind,
        input: &NewContent,
    ) -> Result<Entity, AppError> {
        let mut properties = JsonMap::new();
        properties.insert("is_free".into(), json!(input.is_free));
        properties.insert("short_desc".into(), json!(input.short_desc));
        properties.insert("long_desc".into(), json!(input.long_desc));
        properties.insert("header_image".into(), json!(input.header_image));
        properties.insert("images".into(), json!(input.images));
        properties.insert("movies".into(), json!(input.movies));
        if let Some(date) = input.release_date() {
            properties.insert("date".into(), json!(date.to_string()));
        }

        let content = self.upsert(kind, &input.name, properties).await?;

        self.link(kind, &content, Relation::Publisher, &input.publishers)
            .await?;
        self.link(kind, &content, Relation::Developer, &input.developers)
            .await?;

        Ok(content)
    }

    async fn create_game(&self, input: &NewGame) -> Result<Entity, AppError> {
        let game = self.create_content(ModelKind::Game, &input.content).await?;

        self.link(ModelKind::Game, &game, Relation::Genre, &input.genres)
            .await?;
        self.link(ModelKind::Game, &game, Relation::Category, &input.categories)
            .await?;

        for dlc_input in &input.dlcs {
            let dlc = self.create_content(ModelKind::Dlc, dlc_input).await?;
            self.nodes
                .connect(ModelKind::Game, &game.node_id, Relation::Dlc, &dlc.node_id)
                .await?;
        }

        Ok(game)
    }

    /// Upsert each named target of `relation` and connect it to `node`.
    async fn link(
        &self,
        kind: ModelKind,
        node: &Entity,
        relation: Relation,
        names: &[String],
    ) -> Result<(), AppError> {
        for name in names {
            let target = self
                .create_entity(relation.target(), &NewEntity::new(name.as_str()))
                .await?;
            self.nodes
                .connect(kind, &node.node_id, relation, &target.node_id)
                .await?;
        }
        Ok(())
    }
}
