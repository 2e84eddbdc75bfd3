//! `/games` handlers.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::context::Context;
use crate::di::FromRef;
use crate::models::{Content, NodeView, OrderBy};
use crate::services::pagination::{clamp_limit, clamp_start, get_paginated_list, Page};
use crate::services::GameService;

const DEFAULT_LIMIT: u64 = 10;
const DEFAULT_SORT: &str = "-name";

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

fn default_sort() -> String {
    DEFAULT_SORT.to_string()
}

/// Query string of `GET /games`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub start: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default = "default_sort")]
    pub sort: String,
}

/// Query string of `GET /games/similar/{node_id}`.
#[derive(Debug, Deserialize)]
pub struct SimilarParams {
    #[serde(default)]
    pub start: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

/// Body of `GET /games/{node_id}`.
#[derive(Debug, Serialize)]
pub struct Detail<T> {
    pub result: T,
}

pub async fn list(
    State(ctx): State<Context>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Page<NodeView<Content>>>, ApiError> {
    let Query(params) = params?;
    let start = clamp_start(params.start);
    let limit = clamp_limit(params.limit);

    let games = GameService::from_ref(&ctx);
    let (results, has_next) = games
        .list(start, limit, &OrderBy::parse(&params.sort))
        .await?;

    let url = format!("{}/games", ctx.config.api_url());
    Ok(Json(get_paginated_list(
        results,
        &url,
        has_next,
        start,
        limit,
    )))
}

pub async fn detail(
    State(ctx): State<Context>,
    Path(node_id): Path<String>,
) -> Result<Json<Detail<Content>>, ApiError> {
    let game = GameService::from_ref(&ctx).detail(&node_id).await?;
    Ok(Json(Detail { result: game }))
}

pub async fn similar(
    State(ctx): State<Context>,
    Path(node_id): Path<String>,
    params: Result<Query<SimilarParams>, QueryRejection>,
) -> Result<Json<Page<NodeView<Content>>>, ApiError> {
    let Query(params) = params?;
    let start = clamp_start(params.start);
    let limit = clamp_limit(params.limit);

    let games = GameService::from_ref(&ctx);
    let (results, has_next) = games.similar(&node_id, start, limit).await?;

    let url = format!("{}/games/similar/{}", ctx.config.api_url(), node_id);
    Ok(Json(get_paginated_list(
        results,
        &url,
        has_next,
        start,
        limit,
    )))
}
