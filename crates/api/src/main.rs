use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use ridehail_cache::{KvStore, MemoryStore, RedisStore};
use ridehail_core::clock::{Clock, SystemClock};
use ridehail_events::{
    HttpWalletProvisioner, LogNotifier, NoopWalletProvisioner, Notifier, WalletProvisioner,
    WebhookClient, WebhookNotifier,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ridehail_api::background;
use ridehail_api::config::ServerConfig;
use ridehail_api::router::build_app_router;
use ridehail_api::state::AppState;

/// Namespace for every key this service writes to Redis.
const REDIS_KEY_PREFIX: &str = "ridehail";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ridehail_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = ridehail_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    ridehail_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    ridehail_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Fast cache ---
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store: Arc<dyn KvStore> = match &config.redis_url {
        Some(url) => Arc::new(
            RedisStore::connect(url, REDIS_KEY_PREFIX)
                .await
                .expect("Failed to connect to Redis"),
        ),
        None => {
            tracing::warn!("REDIS_URL not set, using in-process cache (single instance only)");
            Arc::new(MemoryStore::new(clock.clone()))
        }
    };

    // --- Outbound collaborators ---
    let webhook = WebhookClient::new().expect("Failed to build HTTP client");

    let notifier: Arc<dyn Notifier> = match &config.notify_webhook_url {
        Some(url) => Arc::new(WebhookNotifier::new(webhook.clone(), url.clone())),
        None => {
            tracing::info!("NOTIFY_WEBHOOK_URL not set, notifications are logged only");
            Arc::new(LogNotifier)
        }
    };

    let wallets: Arc<dyn WalletProvisioner> = match &config.wallet_service_url {
        Some(url) => Arc::new(HttpWalletProvisioner::new(webhook, url)),
        None => {
            tracing::info!("WALLET_SERVICE_URL not set, wallet provisioning skipped");
            Arc::new(NoopWalletProvisioner)
        }
    };

    // --- App state ---
    let state = AppState::new(pool, config.clone(), clock, store, notifier, wallets);

    // --- Background jobs ---
    let cancel = CancellationToken::new();
    let cleanup_handle = tokio::spawn(background::session_cleanup::run(
        Arc::clone(&state.auth),
        config.session_cleanup.interval,
        cancel.clone(),
    ));

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), cleanup_handle).await;
    tracing::info!("Session cleanup stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
