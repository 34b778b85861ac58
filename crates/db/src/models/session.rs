//! Refresh-token session model and DTOs.

use ridehail_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row from the `sessions` table.
///
/// `token_hash` is the SHA-256 digest of the opaque refresh token handed to
/// the client; `replaced_by` holds the digest of the token this session was
/// rotated from.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub account_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub replaced_by: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}

/// Derived session state. `Expired` is never persisted; it comes from
/// comparing `expires_at` with the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Revoked,
    Expired,
}

impl Session {
    /// Revocation wins over expiry so a replayed token reports "revoked".
    pub fn state(&self, now: Timestamp) -> SessionState {
        if self.revoked_at.is_some() {
            SessionState::Revoked
        } else if self.expires_at < now {
            SessionState::Expired
        } else {
            SessionState::Active
        }
    }
}

/// DTO for creating a new session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub account_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub replaced_by: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
