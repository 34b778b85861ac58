//! Admin driver approval.

mod common;

use axum::http::StatusCode;
use common::{access_token, body_json, build_test_app, get_auth, put_json_auth, register, ADMIN_EMAIL};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn approval_is_visible_immediately(pool: PgPool) {
    let t = build_test_app(pool);
    let admin = access_token(&register(t.app(), ADMIN_EMAIL, "+5511900001111", "PASSENGER").await);
    let driver_json = register(t.app(), "new@drivers.test", "+5511900002222", "DRIVER").await;
    let driver_token = access_token(&driver_json);
    let driver_id = driver_json["user"]["driver_id"].as_i64().unwrap();

    let me = body_json(get_auth(t.app(), "/api/v1/auth/me", &driver_token).await).await;
    assert_eq!(me["data"]["driver_status"], "PENDING");

    let response = put_json_auth(
        t.app(),
        &format!("/api/v1/admin/drivers/{driver_id}/status"),
        json!({ "status": "APPROVED" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], driver_id);
    assert_eq!(json["data"]["account_status"], "APPROVED");

    // The cached profile was dropped, so the change shows without waiting.
    let me = body_json(get_auth(t.app(), "/api/v1/auth/me", &driver_token).await).await;
    assert_eq!(me["data"]["driver_status"], "APPROVED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_admin_is_forbidden(pool: PgPool) {
    let t = build_test_app(pool);
    let driver_json = register(t.app(), "self@drivers.test", "+5511900003333", "DRIVER").await;
    let token = access_token(&driver_json);
    let driver_id = driver_json["user"]["driver_id"].as_i64().unwrap();

    let response = put_json_auth(
        t.app(),
        &format!("/api/v1/admin/drivers/{driver_id}/status"),
        json!({ "status": "APPROVED" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_driver_is_not_found(pool: PgPool) {
    let t = build_test_app(pool);
    let admin = access_token(&register(t.app(), ADMIN_EMAIL, "+5511900004444", "PASSENGER").await);

    let response = put_json_auth(
        t.app(),
        "/api/v1/admin/drivers/424242/status",
        json!({ "status": "SUSPENDED" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
