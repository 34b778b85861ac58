//! Repository for the append-only `auth_logs` table.

use ridehail_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::auth_log::{AuthLog, CreateAuthLog};

const COLUMNS: &str = "id, account_id, email, action, success, failure_reason, \
                        ip_address, user_agent, created_at";

pub struct AuthLogRepo;

impl AuthLogRepo {
    /// Append one auth event.
    pub async fn create<'e>(
        db: impl PgExecutor<'e>,
        input: &CreateAuthLog,
    ) -> Result<AuthLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO auth_logs
                (account_id, email, action, success, failure_reason, ip_address, user_agent)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuthLog>(&query)
            .bind(input.account_id)
            .bind(&input.email)
            .bind(input.action.as_str())
            .bind(input.success)
            .bind(&input.failure_reason)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .fetch_one(db)
            .await
    }

    /// Events recorded against an email address, oldest first.
    ///
    /// Keyed by email rather than account so failed lookups are included.
    pub async fn list_for_email<'e>(
        db: impl PgExecutor<'e>,
        email: &str,
    ) -> Result<Vec<AuthLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM auth_logs WHERE email = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, AuthLog>(&query)
            .bind(email)
            .fetch_all(db)
            .await
    }

    pub async fn list_for_account<'e>(
        db: impl PgExecutor<'e>,
        account_id: DbId,
    ) -> Result<Vec<AuthLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM auth_logs WHERE account_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, AuthLog>(&query)
            .bind(account_id)
            .fetch_all(db)
            .await
    }
}
