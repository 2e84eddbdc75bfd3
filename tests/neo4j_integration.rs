//! Integration tests against a live Neo4j.
//!
//! These tests require a running Neo4j with an otherwise empty catalog,
//! reachable through the usual configuration (`DB_HOST`, `DB_PASSWORD`, ...).
//! Run with: `cargo test --features integration --test neo4j_integration`

#![cfg(feature = "integration")]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value as JsonValue};
use serial_test::serial;
use tower::ServiceExt;

use game_catalog::api;
use game_catalog::config::Config;
use game_catalog::context::Context;
use game_catalog::graph::backends::neo4j::Neo4jClient;
use game_catalog::graph::QueryExt;
use game_catalog::migrations::run_migrations;
use game_catalog::models::{
    Content, Entity, Filter, ModelKind, NewContent, NewEntity, NewGame, OrderBy,
};
use game_catalog::services::ModelService;
use game_catalog::FromRef;

const PREFIX: &str = "itest-";

async fn create_context() -> Context {
    let config = Config::load().expect("Failed to load config");
    let client = Neo4jClient::connect(
        &config.database_address(),
        &config.database.username,
        &config.database.password,
    )
    .await
    .expect("Failed to connect to test database");
    run_migrations(&client).await.expect("Failed to migrate");
    Context::new(client, config)
}

/// Clean up test data before/after tests
async fn cleanup(ctx: &Context) {
    let _ = ctx
        .graph
        .query("MATCH (n:Entity) WHERE n.name STARTS WITH $prefix DETACH DELETE n")
        .param("prefix", PREFIX)
        .run()
        .await;
}

fn name(suffix: impl std::fmt::Display) -> String {
    format!("{}{}", PREFIX, suffix)
}

fn game(suffix: impl std::fmt::Display, genres: &[&str], categories: &[&str]) -> NewGame {
    let mut game = NewGame::new(NewContent::new(
        name(suffix),
        false,
        "desc",
        "also desc",
        "http://example.com/image",
    ));
    game.genres = genres.iter().map(|g| name(g)).collect();
    game.categories = categories.iter().map(|c| name(c)).collect();
    game
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, JsonValue) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

/// Path and query of an absolute pagination link.
fn relative(ctx: &Context, link: &JsonValue) -> String {
    let link = link.as_str().expect("link is a string");
    link.strip_prefix(&ctx.config.api_url())
        .expect("link uses the API base URL")
        .to_string()
}

// All tests run serially since they share one database
#[serial]
mod model_service_tests {
    use super::*;

    #[tokio::test]
    async fn test_creation_no_duplicates() {
        let ctx = create_context().await;
        cleanup(&ctx).await;
        let models = ModelService::from_ref(&ctx);

        let mut node_ids = Vec::new();
        for _ in 0..4 {
            let entity = models
                .create_model(ModelKind::Entity, NewEntity::new(name("unique")))
                .await
                .unwrap();
            node_ids.push(entity.node_id);
        }
        node_ids.dedup();
        assert_eq!(node_ids.len(), 1);

        let (results, has_more): (Vec<Entity>, bool) = models
            .get_filtered_list(
                ModelKind::Entity,
                0,
                None,
                &OrderBy::default(),
                &Filter::name(name("unique")),
            )
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert!(!has_more);

        cleanup(&ctx).await;
    }

    #[tokio::test]
    async fn test_filtered_list_boolean() {
        let ctx = create_context().await;
        cleanup(&ctx).await;
        let models = ModelService::from_ref(&ctx);

        for counter in 0..10 {
            let mut input = game(counter, &[], &[]);
            input.content.is_free = counter % 3 == 0;
            models.create_model(ModelKind::Game, input).await.unwrap();
        }

        let filter = Filter::new().eq("is_free", true);
        let (results, has_more): (Vec<Content>, bool) = models
            .get_filtered_list(ModelKind::Game, 0, Some(10), &OrderBy::default(), &filter)
            .await
            .unwrap();
        let names: Vec<_> = results.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names.len(), 4, "{:?}", names);
        assert!(!has_more);
        assert!(names.windows(2).all(|w| w[0] >= w[1]));

        cleanup(&ctx).await;
    }

    #[tokio::test]
    async fn test_bare_creation_for_every_bare_kind() {
        let ctx = create_context().await;
        cleanup(&ctx).await;
        let models = ModelService::from_ref(&ctx);

        for kind in [
            ModelKind::Entity,
            ModelKind::Company,
            ModelKind::Genre,
            ModelKind::Category,
        ] {
            let created = models
                .create_model(kind, NewEntity::new(name("bare")))
                .await
                .unwrap();
            assert_eq!(created.name, name("bare"));

            let found: Entity = models
                .get_model(kind, &Filter::node_id(&created.node_id))
                .await
                .unwrap();
            assert_eq!(found, created);

            models.delete_model(kind, &name("bare")).await.unwrap();
        }

        cleanup(&ctx).await;
    }

    #[tokio::test]
    async fn test_similar_list() {
        let ctx = create_context().await;
        cleanup(&ctx).await;
        let models = ModelService::from_ref(&ctx);

        for counter in 0..10 {
            let (genres, categories): (&[&str], &[&str]) = if counter % 3 == 0 {
                (&["genre1", "genre2"], &["category1", "category2"])
            } else {
                (&[], &[])
            };
            models
                .create_model(ModelKind::Game, game(counter, genres, categories))
                .await
                .unwrap();
        }

        let (results, has_more): (Vec<Content>, bool) = models
            .get_similar_list(ModelKind::Game, &name(0), 0, Some(5))
            .await
            .unwrap();
        let mut names: Vec<_> = results.iter().map(|g| g.name.clone()).collect();
        names.sort();
        assert_eq!(names, vec![name(3), name(6), name(9)]);
        assert!(!has_more);

        cleanup(&ctx).await;
    }

    #[tokio::test]
    async fn test_similar_list_ranks_by_shared_connections() {
        let ctx = create_context().await;
        cleanup(&ctx).await;
        let models = ModelService::from_ref(&ctx);

        let fixtures: [(&str, &[&str]); 6] = [
            ("base", &["g1", "g2", "g3"]),
            ("one", &["g1"]),
            ("two-b", &["g1", "g2"]),
            ("three", &["g1", "g2", "g3"]),
            ("two-a", &["g2", "g3"]),
            ("unrelated", &["g4"]),
        ];
        for (suffix, genres) in fixtures {
            models
                .create_model(ModelKind::Game, game(suffix, genres, &[]))
                .await
                .unwrap();
        }

        let (all, has_more): (Vec<Content>, bool) = models
            .get_similar_list(ModelKind::Game, &name("base"), 0, None)
            .await
            .unwrap();
        let names: Vec<_> = all.iter().map(|g| g.name.clone()).collect();
        assert_eq!(
            names,
            vec![name("three"), name("two-a"), name("two-b"), name("one")]
        );
        assert!(!has_more);

        let (first, has_more): (Vec<Content>, bool) = models
            .get_similar_list(ModelKind::Game, &name("base"), 0, Some(2))
            .await
            .unwrap();
        let names: Vec<_> = first.iter().map(|g| g.name.clone()).collect();
        assert_eq!(names, vec![name("three"), name("two-a")]);
        assert!(has_more);

        let (second, has_more): (Vec<Content>, bool) = models
            .get_similar_list(ModelKind::Game, &name("base"), 2, Some(2))
            .await
            .unwrap();
        let names: Vec<_> = second.iter().map(|g| g.name.clone()).collect();
        assert_eq!(names, vec![name("two-b"), name("one")]);
        assert!(!has_more);

        cleanup(&ctx).await;
    }

    #[tokio::test]
    async fn test_delete_cascades_relationships() {
        let ctx = create_context().await;
        cleanup(&ctx).await;
        let models = ModelService::from_ref(&ctx);

        let mut input = game("with-dlc", &["genre"], &[]);
        input.content.publishers = vec![name("publisher")];
        input.dlcs = vec![NewContent::new(name("dlc"), true, "s", "l", "http://example.com/dlc")];
        models.create_model(ModelKind::Game, input).await.unwrap();

        let rows = ctx
            .graph
            .query("MATCH (g:Game {name: $name})-[r]-() RETURN count(r) AS rels")
            .param("name", name("with-dlc"))
            .fetch_one()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rows.get::<i64>("rels").unwrap(), 3);

        models.delete_model(ModelKind::Game, &name("with-dlc")).await.unwrap();
        models.delete_model(ModelKind::Game, &name("with-dlc")).await.unwrap();

        let genre: Entity = models
            .get_model(ModelKind::Genre, &Filter::name(name("genre")))
            .await
            .unwrap();
        assert_eq!(genre.name, name("genre"));

        cleanup(&ctx).await;
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let ctx = create_context().await;
        let result = run_migrations(ctx.graph.as_ref()).await.unwrap();
        assert!(result.applied_migrations.is_empty());
        assert!(result.current_version >= 2);
    }
}

#[serial]
mod api_tests {
    use super::*;

    #[tokio::test]
    async fn test_detail_api() {
        let ctx = create_context().await;
        cleanup(&ctx).await;
        let models = ModelService::from_ref(&ctx);

        let fields = json!({
            "name": name("Test Game"),
            "is_free": false,
            "long_desc": "Detailed description.",
            "short_desc": "short description",
            "date": "23 Aug, 2016",
            "header_image": "https://test.url",
        });
        let game = models
            .create_from_value("Game", fields.clone())
            .await
            .unwrap();

        let uri = format!("/games/{}", game.node_id);
        let (status, body) = get_json(api::router(ctx.clone()), &uri).await;
        assert_eq!(status, StatusCode::OK);
        let result = &body["result"];
        assert_eq!(result["node_id"], json!(game.node_id));
        for field in ["name", "long_desc", "short_desc", "header_image", "date"] {
            assert_eq!(result[field], fields[field], "field {}", field);
        }

        models.delete_model(ModelKind::Game, &game.name).await.unwrap();
        let (status, body) = get_json(api::router(ctx.clone()), &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].is_string());

        cleanup(&ctx).await;
    }

    #[tokio::test]
    async fn test_list_api() {
        let ctx = create_context().await;
        cleanup(&ctx).await;
        let models = ModelService::from_ref(&ctx);

        for counter in 0..10 {
            models
                .create_model(ModelKind::Game, game(counter, &[], &[]))
                .await
                .unwrap();
        }

        let (status, body) = get_json(api::router(ctx.clone()), "/games?limit=7&sort=-name").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"].as_array().unwrap().len(), 7);
        assert!(body["previous"].is_null());

        let next = relative(&ctx, &body["next"]);
        let (status, body) = get_json(api::router(ctx.clone()), &next).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"].as_array().unwrap().len(), 3);
        assert!(body["next"].is_null());

        cleanup(&ctx).await;
    }

    #[tokio::test]
    async fn test_similar_api() {
        let ctx = create_context().await;
        cleanup(&ctx).await;
        let models = ModelService::from_ref(&ctx);

        let mut base = None;
        for counter in 0..20 {
            let (genres, categories): (&[&str], &[&str]) = if counter < 10 {
                (&["genre1", "genre2"], &["category1", "category2"])
            } else {
                (&[], &[])
            };
            let created = models
                .create_model(ModelKind::Game, game(counter, genres, categories))
                .await
                .unwrap();
            base.get_or_insert(created);
        }
        let base = base.unwrap();

        let uri = format!("/games/similar/{}?limit=5", base.node_id);
        let (status, body) = get_json(api::router(ctx.clone()), &uri).await;
        assert_eq!(status, StatusCode::OK);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r["node_id"] != json!(base.node_id)));
        assert_eq!(results[0]["connections"]["genres"].as_array().unwrap().len(), 2);
        assert!(body["previous"].is_null());

        let next = relative(&ctx, &body["next"]);
        let (status, body) = get_json(api::router(ctx.clone()), &next).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"].as_array().unwrap().len(), 4);
        assert!(body["next"].is_null());

        cleanup(&ctx).await;
    }
}
