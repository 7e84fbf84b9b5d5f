//! Health endpoint and cross-cutting middleware: request ids and CORS.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use common::{body_json, get};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

async fn preflight(app: Router, origin: &str) -> Response {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/levels")
        .header("origin", origin)
        .header("access-control-request-method", "PUT")
        .header("access-control-request-headers", "authorization")
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

fn header<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_database_and_build_version(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn routes_are_not_prefixed(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/health").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn request_id_is_generated_or_echoed(pool: PgPool) {
    let response = get(common::build_test_app(pool.clone()), "/health").await;
    let generated = header(&response, "x-request-id").expect("generated x-request-id");
    assert!(Uuid::parse_str(generated).is_ok(), "not a uuid: {generated}");

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "client-trace-7")
        .body(Body::empty())
        .unwrap();
    let response = common::build_test_app(pool).oneshot(request).await.unwrap();
    assert_eq!(header(&response, "x-request-id"), Some("client-trace-7"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listed_origin_may_send_bearer_credentials(pool: PgPool) {
    let response = preflight(common::build_test_app(pool), "http://localhost:5173").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header(&response, "access-control-allow-origin"),
        Some("http://localhost:5173")
    );
    assert_eq!(header(&response, "access-control-allow-credentials"), Some("true"));
    let allowed = header(&response, "access-control-allow-headers").unwrap_or_default();
    assert!(allowed.to_ascii_lowercase().contains("authorization"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unlisted_origin_gets_no_cors_grant(pool: PgPool) {
    let response = preflight(common::build_test_app(pool), "http://evil.test").await;
    assert!(header(&response, "access-control-allow-origin").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wildcard_origin_drops_credentials(pool: PgPool) {
    let mut config = common::test_config();
    config.cors_origins = vec!["*".to_string()];
    let response = preflight(common::build_test_app_with(pool, config), "http://any.test").await;

    assert_eq!(header(&response, "access-control-allow-origin"), Some("*"));
    assert!(header(&response, "access-control-allow-credentials").is_none());
}
