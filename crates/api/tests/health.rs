//! Health endpoint and router-level behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_app_with_cache_outage, build_test_app, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_database(pool: PgPool) {
    let t = build_test_app(pool);
    let response = get(t.app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["cache_healthy"], true);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_is_not_found(pool: PgPool) {
    let t = build_test_app(pool);
    let response = get(t.app(), "/api/v1/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Route not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cache_outage_degrades_health(pool: PgPool) {
    let (app, _) = build_app_with_cache_outage(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["cache_healthy"], false);
}
