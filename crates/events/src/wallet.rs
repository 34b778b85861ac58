//! Post-registration wallet provisioning.
//!
//! Called after the registration transaction commits; a failure is logged by
//! the caller and registration stands.

use async_trait::async_trait;
use ridehail_core::types::DbId;
use serde::Serialize;

use crate::webhook::{WebhookClient, WebhookError};

#[async_trait]
pub trait WalletProvisioner: Send + Sync {
    async fn provision(&self, account_id: DbId) -> Result<(), WebhookError>;
}

#[derive(Serialize)]
struct CreateWallet {
    account_id: DbId,
}

/// Asks the payments service at `{base_url}/wallets` to get-or-create a
/// wallet for the account.
pub struct HttpWalletProvisioner {
    client: WebhookClient,
    url: String,
}

impl HttpWalletProvisioner {
    pub fn new(client: WebhookClient, base_url: &str) -> Self {
        Self {
            client,
            url: format!("{}/wallets", base_url.trim_end_matches('/')),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl WalletProvisioner for HttpWalletProvisioner {
    async fn provision(&self, account_id: DbId) -> Result<(), WebhookError> {
        self.client
            .post_json(&self.url, &CreateWallet { account_id })
            .await
    }
}

/// No wallet service configured.
pub struct NoopWalletProvisioner;

#[async_trait]
impl WalletProvisioner for NoopWalletProvisioner {
    async fn provision(&self, account_id: DbId) -> Result<(), WebhookError> {
        tracing::debug!(account_id, "Wallet provisioning skipped (no service configured)");
        Ok(())
    }
}
