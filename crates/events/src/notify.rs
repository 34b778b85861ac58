//! Outbound notifications.
//!
//! Delivery mechanics live behind the configured webhook; this side only
//! decides what to say and makes sure a failure never reaches the caller.

use std::sync::Arc;

use async_trait::async_trait;
use ridehail_core::status::DriverStatus;
use ridehail_core::types::{DbId, Timestamp};
use serde::Serialize;

use crate::webhook::{WebhookClient, WebhookError};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    DriverApplicationReceived {
        driver_id: DbId,
        account_id: DbId,
        email: String,
        full_name: String,
    },
    DriverStatusChanged {
        driver_id: DbId,
        account_id: DbId,
        email: String,
        status: DriverStatus,
    },
    PasswordResetRequested {
        account_id: DbId,
        email: String,
        reset_token: String,
        expires_at: Timestamp,
    },
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DriverApplicationReceived { .. } => "driver_application_received",
            Self::DriverStatusChanged { .. } => "driver_status_changed",
            Self::PasswordResetRequested { .. } => "password_reset_requested",
        }
    }

    pub fn account_id(&self) -> DbId {
        match self {
            Self::DriverApplicationReceived { account_id, .. }
            | Self::DriverStatusChanged { account_id, .. }
            | Self::PasswordResetRequested { account_id, .. } => *account_id,
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), WebhookError>;
}

/// Posts each notification as JSON to a single endpoint.
pub struct WebhookNotifier {
    client: WebhookClient,
    url: String,
}

impl WebhookNotifier {
    pub fn new(client: WebhookClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), WebhookError> {
        self.client.post_json(&self.url, notification).await
    }
}

/// Used when no endpoint is configured. Logs the event kind only; reset
/// tokens are never written to the log.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), WebhookError> {
        tracing::info!(
            kind = notification.kind(),
            account_id = notification.account_id(),
            "Notification (no endpoint configured)"
        );
        Ok(())
    }
}

/// Fire-and-forget: send on a background task and log any failure.
pub fn dispatch(notifier: Arc<dyn Notifier>, notification: Notification) {
    tokio::spawn(async move {
        if let Err(e) = notifier.send(&notification).await {
            tracing::warn!(
                kind = notification.kind(),
                account_id = notification.account_id(),
                error = %e,
                "Notification dispatch failed",
            );
        }
    });
}
