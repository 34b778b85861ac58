//! Repository for the `sessions` table.

use ridehail_core::types::{DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::session::{CreateSession, Session};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, account_id, token_hash, expires_at, revoked_at, replaced_by, \
                        ip_address, user_agent, created_at";

/// Provides CRUD operations for refresh-token sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create<'e>(
        db: impl PgExecutor<'e>,
        input: &CreateSession,
    ) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (account_id, token_hash, expires_at, replaced_by, ip_address, user_agent)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(input.account_id)
            .bind(&input.token_hash)
            .bind(input.expires_at)
            .bind(&input.replaced_by)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .fetch_one(db)
            .await
    }

    /// Find a session by token digest regardless of its state.
    ///
    /// Callers inspect [`Session::state`] so revoked and expired tokens can be
    /// reported distinctly.
    pub async fn find_by_token_hash<'e>(
        db: impl PgExecutor<'e>,
        token_hash: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE token_hash = $1");
        sqlx::query_as::<_, Session>(&query)
            .bind(token_hash)
            .fetch_optional(db)
            .await
    }

    /// Revoke a single session. Returns `true` only for the caller that
    /// actually flipped it from live to revoked.
    pub async fn revoke<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE sessions SET revoked_at = $2 WHERE id = $1 AND revoked_at IS NULL")
                .bind(id)
                .bind(now)
                .execute(db)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke all live sessions for an account. Returns the count revoked.
    pub async fn revoke_all_for_account<'e>(
        db: impl PgExecutor<'e>,
        account_id: DbId,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions SET revoked_at = $2
             WHERE account_id = $1 AND revoked_at IS NULL",
        )
        .bind(account_id)
        .bind(now)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete sessions that expired before `now` or were revoked before
    /// `revoked_before`. Returns the count of deleted rows.
    pub async fn cleanup_expired<'e>(
        db: impl PgExecutor<'e>,
        now: Timestamp,
        revoked_before: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM sessions WHERE expires_at < $1 OR revoked_at < $2")
                .bind(now)
                .bind(revoked_before)
                .execute(db)
                .await?;
        Ok(result.rows_affected())
    }

    /// Live (unrevoked, unexpired) sessions for an account.
    pub async fn count_active_for_account<'e>(
        db: impl PgExecutor<'e>,
        account_id: DbId,
        now: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM sessions
             WHERE account_id = $1 AND revoked_at IS NULL AND expires_at > $2",
        )
        .bind(account_id)
        .bind(now)
        .fetch_one(db)
        .await
    }
}
