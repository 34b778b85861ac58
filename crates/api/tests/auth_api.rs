//! HTTP-level tests for registration, login lockout, refresh rotation,
//! logout and the password flows.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use chrono::Duration;
use common::{
    access_token, body_json, build_test_app, get_auth, login, post_json, post_json_auth,
    refresh_token, register, PASSWORD,
};
use ridehail_api::auth::jwt::{self, validate_access_token};
use ridehail_api::error::AppError;
use ridehail_api::middleware::request_meta::RequestMeta;
use ridehail_core::clock::Clock;
use ridehail_core::error::CoreError;
use ridehail_db::repositories::{AccountRepo, AuthLogRepo, SessionRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_passenger_issues_tokens(pool: PgPool) {
    let t = build_test_app(pool);
    let json = register(t.app(), "Rider@Example.com", "+5511900000001", "PASSENGER").await;

    assert_eq!(json["token_type"], "Bearer");
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["user"]["email"], "rider@example.com");
    assert_eq!(json["user"]["is_passenger"], true);
    assert_eq!(json["user"]["is_driver"], false);
    assert!(json["user"]["passenger_id"].is_number());

    let claims = validate_access_token(&access_token(&json), &t.state.config.jwt).unwrap();
    assert!(claims.is_passenger);
    assert!(!claims.is_driver);
    assert_eq!(claims.driver_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_driver_starts_pending(pool: PgPool) {
    let t = build_test_app(pool);
    let json = register(t.app(), "driver@example.com", "+5511900000002", "DRIVER").await;

    assert_eq!(json["user"]["is_driver"], true);
    assert_eq!(json["user"]["is_passenger"], false);
    assert_eq!(json["user"]["driver_status"], "PENDING");

    let claims = validate_access_token(&access_token(&json), &t.state.config.jwt).unwrap();
    assert!(claims.is_driver);
    assert!(claims.driver_id.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_then_phone_conflict(pool: PgPool) {
    let t = build_test_app(pool.clone());
    register(t.app(), "dup@example.com", "+5511900000003", "PASSENGER").await;

    // Same email, different everything else.
    let response = post_json(
        t.app(),
        "/api/v1/auth/register",
        json!({
            "email": "DUP@example.com",
            "phone": "+5511900000099",
            "password": PASSWORD,
            "first_name": "Other",
            "last_name": "Person",
            "user_type": "DRIVER",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "Email already registered");

    // New email, taken phone.
    let response = post_json(
        t.app(),
        "/api/v1/auth/register",
        json!({
            "email": "fresh@example.com",
            "phone": "+5511900000003",
            "password": PASSWORD,
            "first_name": "Other",
            "last_name": "Person",
            "user_type": "PASSENGER",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "Phone already registered");

    let logs = AuthLogRepo::list_for_email(&pool, "dup@example.com").await.unwrap();
    assert_eq!(logs.len(), 2);
    assert!(logs[0].success);
    assert!(!logs[1].success);
    assert_eq!(logs[1].failure_reason.as_deref(), Some("Email already registered"));

    let logs = AuthLogRepo::list_for_email(&pool, "fresh@example.com").await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "REGISTER");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn short_password_is_rejected(pool: PgPool) {
    let t = build_test_app(pool);
    let response = post_json(
        t.app(),
        "/api/v1/auth/register",
        json!({
            "email": "short@example.com",
            "phone": "+5511900000004",
            "password": "abc",
            "first_name": "Short",
            "last_name": "Pw",
            "user_type": "PASSENGER",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login and lockout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_email_is_generic_unauthorized(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let response = login(t.app(), "ghost@example.com", PASSWORD).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid credentials");

    let logs = AuthLogRepo::list_for_email(&pool, "ghost@example.com").await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].account_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn fifth_failure_locks_until_window_passes(pool: PgPool) {
    let t = build_test_app(pool.clone());
    register(t.app(), "lock@example.com", "+5511900000005", "PASSENGER").await;

    for _ in 0..4 {
        let response = login(t.app(), "lock@example.com", "wrong-password").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "Invalid credentials");
    }

    let response = login(t.app(), "lock@example.com", "wrong-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let error = body_json(response).await["error"].as_str().unwrap().to_string();
    assert!(error.contains("locked"), "unexpected message: {error}");

    // Correct password is refused while locked.
    let response = login(t.app(), "lock@example.com", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let error = body_json(response).await["error"].as_str().unwrap().to_string();
    assert!(error.contains("30 minutes"), "unexpected message: {error}");

    t.clock.advance(Duration::minutes(29));
    let response = login(t.app(), "lock@example.com", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    t.clock.advance(Duration::minutes(2));
    let response = login(t.app(), "lock@example.com", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let account = AccountRepo::find_by_email(&pool, "lock@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(account.failed_login_count, 0);
    assert_eq!(account.locked_until, None);

    let logs = AuthLogRepo::list_for_email(&pool, "lock@example.com").await.unwrap();
    assert_eq!(logs.iter().filter(|l| l.action == "ACCOUNT_LOCKED").count(), 1);
    assert!(logs
        .iter()
        .any(|l| l.failure_reason.as_deref() == Some("Invalid password (attempt 4/5)")));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_failures_still_lock(pool: PgPool) {
    let t = build_test_app(pool.clone());
    register(t.app(), "burst@example.com", "+5511900000015", "PASSENGER").await;
    let meta = RequestMeta::default();

    let results = futures::future::join_all(
        (0..10).map(|_| t.state.auth.login("burst@example.com", "wrong-password", &meta)),
    )
    .await;
    for result in &results {
        assert_matches!(result, Err(AppError::Core(CoreError::Unauthorized(_))));
    }

    let account = AccountRepo::find_by_email(&pool, "burst@example.com")
        .await
        .unwrap()
        .unwrap();
    // Attempts that already saw the lock do not count, so only a floor holds.
    assert!(account.failed_login_count >= 5, "count was {}", account.failed_login_count);
    assert!(account.locked_until.is_some());

    let response = login(t.app(), "burst@example.com", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let error = body_json(response).await["error"].as_str().unwrap().to_string();
    assert!(error.contains("locked"), "unexpected message: {error}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_allow_list_sets_claim(pool: PgPool) {
    let t = build_test_app(pool);
    let json = register(t.app(), common::ADMIN_EMAIL, "+5511900000006", "PASSENGER").await;

    assert_eq!(json["user"]["is_admin"], true);
    let claims = validate_access_token(&access_token(&json), &t.state.config.jwt).unwrap();
    assert!(claims.is_admin);
}

// ---------------------------------------------------------------------------
// Refresh rotation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_token_works_exactly_once(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let registered = register(t.app(), "rotate@example.com", "+5511900000007", "PASSENGER").await;
    let first = refresh_token(&registered);

    let response = post_json(t.app(), "/api/v1/auth/refresh", json!({ "refresh_token": first })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(refresh_token(&rotated), first);

    let response = post_json(t.app(), "/api/v1/auth/refresh", json!({ "refresh_token": first })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["error"],
        "Refresh token has been revoked"
    );

    let account_id = registered["user"]["id"].as_i64().unwrap();
    let live = SessionRepo::count_active_for_account(&pool, account_id, t.clock.now())
        .await
        .unwrap();
    assert_eq!(live, 1);

    let logs = AuthLogRepo::list_for_account(&pool, account_id).await.unwrap();
    assert!(logs.iter().any(|l| l.action == "REFRESH_TOKEN"
        && !l.success
        && l.failure_reason.as_deref() == Some("Token revoked")));

    // The successor keeps working.
    let response = post_json(
        t.app(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token(&rotated) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_refresh_has_one_winner(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let registered = register(t.app(), "race@example.com", "+5511900000008", "PASSENGER").await;
    let token = refresh_token(&registered);
    let meta = RequestMeta::default();

    let results = futures::future::join_all(
        (0..2).map(|_| t.state.auth.refresh(&token, &meta)),
    )
    .await;

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    for result in results.iter().filter(|r| r.is_err()) {
        assert_matches!(result, Err(AppError::Core(CoreError::Unauthorized(_))));
    }

    let account_id = registered["user"]["id"].as_i64().unwrap();
    let live = SessionRepo::count_active_for_account(&pool, account_id, t.clock.now())
        .await
        .unwrap();
    assert_eq!(live, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn expired_refresh_token_is_rejected(pool: PgPool) {
    let t = build_test_app(pool);
    let registered = register(t.app(), "old@example.com", "+5511900000009", "PASSENGER").await;

    t.clock.advance(Duration::days(31));
    let response = post_json(
        t.app(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token(&registered) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Refresh token has expired");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_refresh_token_is_rejected(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let response = post_json(
        t.app(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": "not-a-real-token" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Logged without an account or email.
    let logs = AuthLogRepo::list_for_email(&pool, "").await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "REFRESH_TOKEN");
    assert!(!logs[0].success);
    assert_eq!(logs[0].account_id, None);
    assert_eq!(logs[0].failure_reason.as_deref(), Some("Unknown token"));
}

// ---------------------------------------------------------------------------
// Logout, profile
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_every_session_and_is_idempotent(pool: PgPool) {
    let t = build_test_app(pool);
    let registered = register(t.app(), "bye@example.com", "+5511900000010", "PASSENGER").await;
    let second = body_json(login(t.app(), "bye@example.com", PASSWORD).await).await;
    let token = access_token(&second);

    let response = post_json_auth(t.app(), "/api/v1/auth/logout", json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    for refresh in [refresh_token(&registered), refresh_token(&second)] {
        let response =
            post_json(t.app(), "/api/v1/auth/refresh", json!({ "refresh_token": refresh })).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = post_json_auth(t.app(), "/api/v1/auth/logout", json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_requires_a_valid_access_token(pool: PgPool) {
    let t = build_test_app(pool);
    let registered = register(t.app(), "me@example.com", "+5511900000011", "DRIVER").await;

    let response = get_auth(t.app(), "/api/v1/auth/me", &access_token(&registered)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "me@example.com");
    assert!(json["data"]["driver_details"]["license_number"]
        .as_str()
        .unwrap()
        .starts_with("TEMP-"));

    let response = common::get(t.app(), "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A refresh token is not a bearer credential.
    let response = get_auth(t.app(), "/api/v1/auth/me", &refresh_token(&registered)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Password flows
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn forgot_password_does_not_reveal_accounts(pool: PgPool) {
    let t = build_test_app(pool.clone());
    register(t.app(), "known@example.com", "+5511900000012", "PASSENGER").await;

    let known = post_json(
        t.app(),
        "/api/v1/auth/forgot-password",
        json!({ "email": "known@example.com" }),
    )
    .await;
    let unknown = post_json(
        t.app(),
        "/api/v1/auth/forgot-password",
        json!({ "email": "nobody@example.com" }),
    )
    .await;

    assert_eq!(known.status(), StatusCode::OK);
    assert_eq!(unknown.status(), StatusCode::OK);
    assert_eq!(body_json(known).await, body_json(unknown).await);

    let logs = AuthLogRepo::list_for_email(&pool, "known@example.com").await.unwrap();
    assert!(logs.iter().any(|l| l.action == "PASSWORD_RESET" && l.success));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reset_password_clears_lock_and_replaces_password(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let registered = register(t.app(), "reset@example.com", "+5511900000013", "PASSENGER").await;
    let account_id = registered["user"]["id"].as_i64().unwrap();

    for _ in 0..5 {
        login(t.app(), "reset@example.com", "wrong-password").await;
    }

    let token = jwt::generate_reset_token(
        account_id,
        "reset-jti".to_string(),
        t.clock.now(),
        &t.state.config.jwt,
    )
    .unwrap();

    // An access token is not a reset token.
    let response = post_json(
        t.app(),
        "/api/v1/auth/reset-password",
        json!({ "token": access_token(&registered), "new_password": "brand-new-secret" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid or expired token");

    let response = post_json(
        t.app(),
        "/api/v1/auth/reset-password",
        json!({ "token": token, "new_password": "brand-new-secret" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        login(t.app(), "reset@example.com", PASSWORD).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        login(t.app(), "reset@example.com", "brand-new-secret").await.status(),
        StatusCode::OK
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn change_password_checks_current(pool: PgPool) {
    let t = build_test_app(pool);
    let registered = register(t.app(), "change@example.com", "+5511900000014", "PASSENGER").await;
    let token = access_token(&registered);

    let response = post_json_auth(
        t.app(),
        "/api/v1/auth/change-password",
        json!({ "current_password": "not-it", "new_password": "another-secret" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json_auth(
        t.app(),
        "/api/v1/auth/change-password",
        json!({ "current_password": PASSWORD, "new_password": "another-secret" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        login(t.app(), "change@example.com", "another-secret").await.status(),
        StatusCode::OK
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_sweep_keeps_live_sessions(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let registered = register(t.app(), "sweep@example.com", "+5511900000015", "PASSENGER").await;
    login(t.app(), "sweep@example.com", PASSWORD).await;

    // Rotate once so one session is revoked.
    post_json(
        t.app(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token(&registered) }),
    )
    .await;

    assert_eq!(t.state.auth.clean_expired_sessions().await.unwrap(), 0);

    // Past the retention window the revoked row goes; live ones have expired
    // by then too.
    t.clock.advance(Duration::days(91));
    assert_eq!(t.state.auth.clean_expired_sessions().await.unwrap(), 3);
}
