//! Authentication audit log model. Rows are immutable (no updated_at).

use ridehail_core::status::AuthAction;
use ridehail_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A single `auth_logs` entry.
#[derive(Debug, Clone, FromRow)]
pub struct AuthLog {
    pub id: DbId,
    pub account_id: Option<DbId>,
    pub email: String,
    pub action: String,
    pub success: bool,
    pub failure_reason: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for appending an auth event. `account_id` is `None` when the lookup
/// itself failed (unknown email).
#[derive(Debug, Clone)]
pub struct CreateAuthLog {
    pub account_id: Option<DbId>,
    pub email: String,
    pub action: AuthAction,
    pub success: bool,
    pub failure_reason: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
