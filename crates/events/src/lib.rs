//! Best-effort collaborators around the core flows.
//!
//! Everything here is allowed to fail without failing the caller:
//!
//! - [`AuthAuditLog`] -- append-only writer for `auth_logs`.
//! - [`Notifier`] -- driver application / status / password reset messages.
//! - [`WalletProvisioner`] -- post-registration wallet creation.
//! - [`WebhookClient`] -- JSON POST with exponential-backoff retry, shared
//!   by the HTTP-backed implementations above.

pub mod audit;
pub mod notify;
pub mod wallet;
pub mod webhook;

pub use audit::{AuthAuditLog, AuthEvent};
pub use notify::{dispatch, LogNotifier, Notification, Notifier, WebhookNotifier};
pub use wallet::{HttpWalletProvisioner, NoopWalletProvisioner, WalletProvisioner};
pub use webhook::{WebhookClient, WebhookError};
