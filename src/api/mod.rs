//! HTTP surface: the `/games` routes and the JSON 404 fallback.

mod error;
pub mod games;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::context::Context;

pub use error::ApiError;

/// Build the application router.
pub fn router(ctx: Context) -> Router {
    Router::new()
        .route("/games", get(games::list))
        .route("/games/:node_id", get(games::detail))
        .route("/games/similar/:node_id", get(games::similar))
        .fallback(not_found)
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> ApiError {
    ApiError::no_route()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::AppError;
    use crate::graph::testing::{row, ScriptedExecutor};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value as JsonValue};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(executor: ScriptedExecutor) -> (Router, Arc<ScriptedExecutor>) {
        let executor = Arc::new(executor);
        let ctx = Context {
            graph: executor.clone(),
            config: Arc::new(Config::default()),
        };
        (router(ctx), executor)
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

    fn game(i: usize) -> JsonValue {
        json!({
            "name": format!("entity-{}", i),
            "node_id": format!("id-{}", i),
            "is_free": false,
            "short_desc": "desc",
            "long_desc": "also desc",
            "header_image": "http://example.com/image",
        })
    }

    #[tokio::test]
    async fn test_list_first_page() {
        let (app, executor) = app(
            ScriptedExecutor::new()
                .then_rows(vec![row(json!({"total": 10}))])
                .then_rows((0..7).map(|i| row(json!({"n": game(i)}))).collect()),
        );

        let (status, body) = get_json(app, "/games?limit=7").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["start"], json!(0));
        assert_eq!(body["limit"], json!(7));
        assert!(body["previous"].is_null());
        assert_eq!(
            body["next"],
            json!("http://localhost:5000/games?start=7&limit=7")
        );
        assert_eq!(body["results"].as_array().unwrap().len(), 7);
        assert_eq!(body["results"][0]["connections"], json!({}));
        assert!(body["results"][0]["date"].is_null());

        assert!(executor.calls()[1].cypher.contains("ORDER BY n.name DESC"));
    }

    #[tokio::test]
    async fn test_list_last_page() {
        let (app, _) = app(
            ScriptedExecutor::new()
                .then_rows(vec![row(json!({"total": 10}))])
                .then_rows((7..10).map(|i| row(json!({"n": game(i)}))).collect()),
        );

        let (status, body) = get_json(app, "/games?start=7&limit=7").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"].as_array().unwrap().len(), 3);
        assert!(body["next"].is_null());
        assert_eq!(
            body["previous"],
            json!("http://localhost:5000/games?start=0&limit=7")
        );
    }

    #[tokio::test]
    async fn test_list_clamps_limit_and_sorts() {
        let (app, executor) = app(ScriptedExecutor::new().then_rows(vec![row(json!({"total": 0}))]));

        let (status, body) = get_json(app, "/games?limit=999&sort=date").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["limit"], json!(100));

        let calls = executor.calls();
        assert_eq!(calls[1].param("limit"), &json!(100));
        assert!(calls[1].cypher.contains("ORDER BY n.date ASC"));
    }

    #[tokio::test]
    async fn test_list_bad_query_is_400() {
        let (app, executor) = app(ScriptedExecutor::new());
        let (status, body) = get_json(app, "/games?start=-1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_list_huge_start_is_empty_page() {
        let (app, executor) = app(ScriptedExecutor::new().then_rows(vec![row(json!({"total": 10}))]));

        let (status, body) = get_json(app, "/games?start=18446744073709551615").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["start"], json!(i64::MAX));
        assert_eq!(body["results"], json!([]));
        assert!(body["next"].is_null());

        assert_eq!(executor.calls()[1].param("skip"), &json!(i64::MAX));
    }

    #[tokio::test]
    async fn test_similar_huge_start_is_empty_page() {
        let (app, executor) = app(
            ScriptedExecutor::new()
                .then_rows(vec![row(json!({"n": game(1)}))])
                .then_rows(vec![row(json!({"n": game(1)}))]),
        );

        let (status, body) = get_json(app, "/games/similar/id-1?start=18446744073709551615&limit=5").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"], json!([]));
        assert!(body["next"].is_null());

        let calls = executor.calls();
        assert_eq!(calls[2].param("skip"), &json!(i64::MAX));
        assert_eq!(calls[3].param("skip"), &json!(i64::MAX));
    }

    #[tokio::test]
    async fn test_list_empty_sort_uses_default_order() {
        let (app, executor) = app(ScriptedExecutor::new().then_rows(vec![row(json!({"total": 0}))]));

        let (status, _) = get_json(app, "/games?sort=").await;
        assert_eq!(status, StatusCode::OK);
        assert!(executor.calls()[1].cypher.contains("ORDER BY n.name DESC"));
    }

    #[tokio::test]
    async fn test_list_bad_sort_is_500() {
        let (app, _) = app(ScriptedExecutor::new().then_rows(vec![row(json!({"total": 1}))]));
        let (status, body) = get_json(app, "/games?sort=name%20DESC").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], json!("Internal server error"));
    }

    #[tokio::test]
    async fn test_detail() {
        let (app, executor) =
            app(ScriptedExecutor::new().then_rows(vec![row(json!({"n": game(1)}))]));

        let (status, body) = get_json(app, "/games/id-1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["node_id"], json!("id-1"));
        assert_eq!(body["result"]["name"], json!("entity-1"));
        assert!(body["result"].get("connections").is_none());
        assert_eq!(executor.calls()[0].param("f0"), &json!("id-1"));
    }

    #[tokio::test]
    async fn test_detail_missing_is_404() {
        let (app, _) = app(ScriptedExecutor::new().then_empty());
        let (status, body) = get_json(app, "/games/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_similar_missing_is_404() {
        let (app, _) = app(ScriptedExecutor::new().then_empty());
        let (status, _) = get_json(app, "/games/similar/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_similar_page_links() {
        let (app, _) = app(
            ScriptedExecutor::new()
                .then_rows(vec![row(json!({"n": game(1)}))])
                .then_rows(vec![row(json!({"n": game(1)}))])
                .then_rows(vec![row(json!({"similar": game(2), "shared": 2}))])
                .then_rows(vec![row(json!({"similar": game(3), "shared": 1}))]),
        );

        let (status, body) = get_json(app, "/games/similar/id-1?start=5&limit=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"][0]["node_id"], json!("id-2"));
        assert_eq!(
            body["next"],
            json!("http://localhost:5000/games/similar/id-1?start=6&limit=1")
        );
        assert_eq!(
            body["previous"],
            json!("http://localhost:5000/games/similar/id-1?start=4&limit=5")
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (app, _) = app(ScriptedExecutor::new());
        let (status, body) = get_json(app, "/nothing/here").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_backend_failure_is_500() {
        let (app, _) = app(ScriptedExecutor::new().then_error(AppError::Query {
            message: "boom".into(),
            query: "MATCH".into(),
        }));
        let (status, _) = get_json(app, "/games/id-1").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
