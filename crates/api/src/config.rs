use std::str::FromStr;
use std::time::Duration;

use ridehail_core::lockout::{LockoutPolicy, DEFAULT_LOCK_DURATION_MINS, DEFAULT_MAX_FAILED_ATTEMPTS};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// Every field except the database URL and the JWT secret has a default
/// suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Fast cache URL. `None` selects the in-process store.
    pub redis_url: Option<String>,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub auth: AuthPolicyConfig,
    pub location: LocationConfig,
    pub session_cleanup: SessionCleanupConfig,
    /// Notification endpoint. `None` logs notifications instead.
    pub notify_webhook_url: Option<String>,
    /// Wallet service base URL. `None` skips provisioning.
    pub wallet_service_url: Option<String>,
}

/// Credential manager policy knobs.
#[derive(Debug, Clone)]
pub struct AuthPolicyConfig {
    /// Lower-cased emails granted the administrator flag at token issuance.
    pub admin_emails: Vec<String>,
    pub lockout: LockoutPolicy,
    pub user_info_cache_ttl: Duration,
}

impl Default for AuthPolicyConfig {
    fn default() -> Self {
        Self {
            admin_emails: Vec::new(),
            lockout: LockoutPolicy::default(),
            user_info_cache_ttl: Duration::from_millis(DEFAULT_USER_INFO_CACHE_TTL_MS),
        }
    }
}

/// Location ping rate limit.
#[derive(Debug, Clone)]
pub struct LocationConfig {
    pub rate_limit_max: i64,
    pub rate_limit_window: Duration,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            rate_limit_max: ridehail_cache::rate_limit::DEFAULT_MAX_PER_WINDOW,
            rate_limit_window: ridehail_cache::rate_limit::DEFAULT_WINDOW,
        }
    }
}

/// Background sweep of dead sessions.
#[derive(Debug, Clone)]
pub struct SessionCleanupConfig {
    pub interval: Duration,
    /// Revoked sessions younger than this are kept for audit.
    pub revoked_retention_days: i64,
}

impl Default for SessionCleanupConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_SESSION_CLEANUP_INTERVAL_SECS),
            revoked_retention_days: DEFAULT_SESSION_REVOKED_RETENTION_DAYS,
        }
    }
}

const DEFAULT_USER_INFO_CACHE_TTL_MS: u64 = 5_000;
const DEFAULT_SESSION_CLEANUP_INTERVAL_SECS: u64 = 3_600;
const DEFAULT_SESSION_REVOKED_RETENTION_DAYS: i64 = 90;

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                          | Default                 |
    /// |----------------------------------|-------------------------|
    /// | `HOST`                           | `0.0.0.0`               |
    /// | `PORT`                           | `3000`                  |
    /// | `REDIS_URL`                      | unset (in-process)      |
    /// | `CORS_ORIGINS`                   | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`           | `30`                    |
    /// | `ADMIN_EMAILS`                   | empty                   |
    /// | `AUTH_MAX_FAILED_ATTEMPTS`       | `5`                     |
    /// | `AUTH_LOCK_DURATION_MINS`        | `30`                    |
    /// | `USER_INFO_CACHE_TTL_MS`         | `5000`                  |
    /// | `LOCATION_RATE_LIMIT_MAX`        | `1`                     |
    /// | `LOCATION_RATE_LIMIT_WINDOW_MS`  | `1000`                  |
    /// | `SESSION_CLEANUP_INTERVAL_SECS`  | `3600`                  |
    /// | `SESSION_REVOKED_RETENTION_DAYS` | `90`                    |
    /// | `NOTIFY_WEBHOOK_URL`             | unset (log only)        |
    /// | `WALLET_SERVICE_URL`             | unset (skipped)         |
    ///
    /// JWT variables are documented on [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on any value that does not parse, so misconfiguration stops
    /// the process at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_or("PORT", 3000);

        let cors_origins = comma_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let admin_emails = comma_list(&std::env::var("ADMIN_EMAILS").unwrap_or_default())
            .into_iter()
            .map(|e| e.to_lowercase())
            .collect();

        let lockout = LockoutPolicy {
            max_failed_attempts: env_or("AUTH_MAX_FAILED_ATTEMPTS", DEFAULT_MAX_FAILED_ATTEMPTS),
            lock_duration: chrono::Duration::minutes(env_or(
                "AUTH_LOCK_DURATION_MINS",
                DEFAULT_LOCK_DURATION_MINS,
            )),
        };

        Self {
            host,
            port,
            redis_url: optional("REDIS_URL"),
            cors_origins,
            request_timeout_secs: nonzero("REQUEST_TIMEOUT_SECS", env_or("REQUEST_TIMEOUT_SECS", 30)),
            jwt: JwtConfig::from_env(),
            auth: AuthPolicyConfig {
                admin_emails,
                lockout,
                user_info_cache_ttl: Duration::from_millis(env_or(
                    "USER_INFO_CACHE_TTL_MS",
                    DEFAULT_USER_INFO_CACHE_TTL_MS,
                )),
            },
            location: LocationConfig {
                rate_limit_max: env_or(
                    "LOCATION_RATE_LIMIT_MAX",
                    ridehail_cache::rate_limit::DEFAULT_MAX_PER_WINDOW,
                ),
                rate_limit_window: Duration::from_millis(nonzero(
                    "LOCATION_RATE_LIMIT_WINDOW_MS",
                    env_or("LOCATION_RATE_LIMIT_WINDOW_MS", 1_000u64),
                )),
            },
            session_cleanup: SessionCleanupConfig {
                interval: Duration::from_secs(nonzero(
                    "SESSION_CLEANUP_INTERVAL_SECS",
                    env_or(
                        "SESSION_CLEANUP_INTERVAL_SECS",
                        DEFAULT_SESSION_CLEANUP_INTERVAL_SECS,
                    ),
                )),
                revoked_retention_days: env_or(
                    "SESSION_REVOKED_RETENTION_DAYS",
                    DEFAULT_SESSION_REVOKED_RETENTION_DAYS,
                ),
            },
            notify_webhook_url: optional("NOTIFY_WEBHOOK_URL"),
            wallet_service_url: optional("WALLET_SERVICE_URL"),
        }
    }
}

/// Parse `name` or fall back to `default` when unset.
pub(crate) fn env_or<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{name} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}

/// Reject a zero interval or window at startup.
fn nonzero(name: &str, value: u64) -> u64 {
    assert!(value > 0, "{name} must be greater than zero");
    value
}

/// Unset and empty are both `None`.
fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
