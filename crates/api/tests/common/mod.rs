#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use async_trait::async_trait;
use http_body_util::BodyExt;
use ridehail_api::auth::jwt::JwtConfig;
use ridehail_api::config::{AuthPolicyConfig, LocationConfig, ServerConfig, SessionCleanupConfig};
use ridehail_api::router::build_app_router;
use ridehail_api::state::AppState;
use ridehail_cache::{CacheError, KvStore, MemoryStore};
use ridehail_core::clock::ManualClock;
use ridehail_events::{LogNotifier, NoopWalletProvisioner};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "ops@ridehail.test";
pub const PASSWORD: &str = "correct-horse-battery";

/// Test configuration: in-process cache, no outbound calls, one admin email.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        redis_url: None,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig::with_secret("integration-test-secret-long-enough-for-hs256"),
        auth: AuthPolicyConfig {
            admin_emails: vec![ADMIN_EMAIL.to_string()],
            ..AuthPolicyConfig::default()
        },
        location: LocationConfig::default(),
        session_cleanup: SessionCleanupConfig::default(),
        notify_webhook_url: None,
        wallet_service_url: None,
    }
}

/// The router plus handles tests need to reach behind it.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub clock: Arc<ManualClock>,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application with the production middleware stack over
/// `pool`, a manual clock and an in-memory key-value store.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let clock = Arc::new(ManualClock::starting_now());
    let store = Arc::new(MemoryStore::new(clock.clone()));
    let (router, state) = build_router(pool, clock.clone(), store.clone());

    TestApp {
        router,
        state,
        clock,
        store,
    }
}

/// Same application, but every key-value call fails as if the cache were
/// down.
pub fn build_app_with_cache_outage(pool: PgPool) -> (Router, AppState) {
    build_router(
        pool,
        Arc::new(ManualClock::starting_now()),
        Arc::new(UnreachableStore),
    )
}

fn build_router(
    pool: PgPool,
    clock: Arc<ManualClock>,
    store: Arc<dyn KvStore>,
) -> (Router, AppState) {
    let config = test_config();
    let state = AppState::new(
        pool,
        config.clone(),
        clock,
        store,
        Arc::new(LogNotifier),
        Arc::new(NoopWalletProvisioner),
    );
    let router = build_app_router(state.clone(), &config);
    (router, state)
}

/// Key-value store whose every call times out.
pub struct UnreachableStore;

#[async_trait]
impl KvStore for UnreachableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Timeout(Duration::from_millis(100)))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> Result<(), CacheError> {
        Err(CacheError::Timeout(Duration::from_millis(100)))
    }

    async fn incr(&self, _key: &str, _ttl: Duration) -> Result<i64, CacheError> {
        Err(CacheError::Timeout(Duration::from_millis(100)))
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(app: Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register through the API and return the token response.
pub async fn register(app: Router, email: &str, phone: &str, user_type: &str) -> Value {
    let body = serde_json::json!({
        "email": email,
        "phone": phone,
        "password": PASSWORD,
        "first_name": "Ana",
        "last_name": "Souza",
        "user_type": user_type,
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}

pub async fn login(app: Router, email: &str, password: &str) -> Response {
    let body = serde_json::json!({ "email": email, "password": password });
    post_json(app, "/api/v1/auth/login", body).await
}

pub fn access_token(json: &Value) -> String {
    json["access_token"].as_str().expect("access_token").to_string()
}

pub fn refresh_token(json: &Value) -> String {
    json["refresh_token"].as_str().expect("refresh_token").to_string()
}
