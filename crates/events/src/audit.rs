//! Authentication audit writer.
//!
//! One `auth_logs` row per authentication outcome. Write failures are
//! logged and swallowed so an audit outage never fails a login.

use ridehail_core::status::AuthAction;
use ridehail_core::types::DbId;
use ridehail_db::models::auth_log::CreateAuthLog;
use ridehail_db::repositories::AuthLogRepo;
use ridehail_db::DbPool;

/// Builder for one audit entry.
#[derive(Debug, Clone)]
pub struct AuthEvent {
    inner: CreateAuthLog,
}

impl AuthEvent {
    pub fn success(action: AuthAction, email: impl Into<String>) -> Self {
        Self::new(action, email, true, None)
    }

    pub fn failure(action: AuthAction, email: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(action, email, false, Some(reason.into()))
    }

    fn new(
        action: AuthAction,
        email: impl Into<String>,
        success: bool,
        failure_reason: Option<String>,
    ) -> Self {
        Self {
            inner: CreateAuthLog {
                account_id: None,
                email: email.into(),
                action,
                success,
                failure_reason,
                ip_address: None,
                user_agent: None,
            },
        }
    }

    pub fn account(mut self, account_id: DbId) -> Self {
        self.inner.account_id = Some(account_id);
        self
    }

    pub fn request(mut self, ip_address: Option<String>, user_agent: Option<String>) -> Self {
        self.inner.ip_address = ip_address;
        self.inner.user_agent = user_agent;
        self
    }

    pub fn action(&self) -> AuthAction {
        self.inner.action
    }

    pub fn is_success(&self) -> bool {
        self.inner.success
    }
}

#[derive(Clone)]
pub struct AuthAuditLog {
    pool: DbPool,
}

impl AuthAuditLog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Persist `event`. Never fails.
    pub async fn record(&self, event: AuthEvent) {
        let AuthEvent { inner } = event;
        if let Err(e) = AuthLogRepo::create(&self.pool, &inner).await {
            tracing::error!(
                action = %inner.action,
                email = %inner.email,
                success = inner.success,
                error = %e,
                "Failed to write auth audit log",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_carries_reason_and_metadata() {
        let event = AuthEvent::failure(AuthAction::Login, "a@example.com", "Invalid password")
            .account(3)
            .request(Some("10.0.0.1".into()), Some("curl/8".into()));

        assert!(!event.is_success());
        assert_eq!(event.action(), AuthAction::Login);
        assert_eq!(event.inner.account_id, Some(3));
        assert_eq!(event.inner.failure_reason.as_deref(), Some("Invalid password"));
        assert_eq!(event.inner.ip_address.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn success_has_no_reason_or_account_by_default() {
        let event = AuthEvent::success(AuthAction::Register, "a@example.com");
        assert!(event.is_success());
        assert!(event.inner.failure_reason.is_none());
        assert!(event.inner.account_id.is_none());
    }
}
