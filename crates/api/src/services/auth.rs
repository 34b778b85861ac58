//! Credential and session manager.
//!
//! Registration, login with lockout, refresh-token rotation, logout, the
//! password reset/change flows, and the short-lived user-info cache.
//!
//! Refresh tokens are opaque random strings; only their SHA-256 hash is
//! stored. Rotation revokes the presented session with a conditional update
//! and issues the successor in the same transaction, so a token value can be
//! exchanged at most once even under concurrent presentation.

use std::collections::HashSet;
use std::sync::Arc;

use ridehail_cache::TtlCache;
use ridehail_core::clock::Clock;
use ridehail_core::error::CoreError;
use ridehail_core::hashing::{generate_jti, generate_refresh_token, sha256_hex};
use ridehail_core::lockout::{validate_password_strength, LockoutPolicy, MIN_PASSWORD_LENGTH};
use ridehail_core::status::{AuthAction, DriverStatus, UserType};
use ridehail_core::types::{DbId, Timestamp};
use ridehail_db::models::account::{
    Account, CreateAccount, CreateDriver, Driver, Passenger, Vehicle,
};
use ridehail_db::models::session::{CreateSession, SessionState};
use ridehail_db::repositories::{
    AccountRepo, DriverRepo, PassengerRepo, SessionRepo, VehicleRepo,
};
use ridehail_db::{begin_read_committed, DbPool};
use ridehail_events::{
    dispatch, AuthAuditLog, AuthEvent, Notification, Notifier, WalletProvisioner,
};
use serde::Serialize;
use sqlx::PgConnection;

use crate::auth::jwt::{self, Claims, JwtConfig, TokenType};
use crate::auth::password::{hash_password, verify_password};
use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::middleware::request_meta::RequestMeta;

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const INVALID_REFRESH_TOKEN: &str = "Invalid refresh token";
const INVALID_RESET_TOKEN: &str = "Invalid or expired token";

/// Placeholder validity for the temporary license a new driver starts with.
const TEMP_LICENSE_VALIDITY_DAYS: i64 = 365;

// ---------------------------------------------------------------------------
// Inputs and outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub email: String,
    pub phone: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_image: Option<String>,
    pub user_type: UserType,
}

/// Token pair plus the caller's profile, returned by register/login/refresh.
#[derive(Debug, Clone, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_image: Option<String>,
    pub is_admin: bool,
    pub is_driver: bool,
    pub is_passenger: bool,
    pub driver_id: Option<DbId>,
    pub driver_status: Option<DriverStatus>,
    pub passenger_id: Option<DbId>,
    pub driver_details: Option<DriverDetails>,
    pub passenger_details: Option<PassengerDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverDetails {
    pub license_number: String,
    pub license_expiry_date: Timestamp,
    pub average_rating: f64,
    pub total_rides: i32,
    pub is_online: bool,
    pub is_available: bool,
    pub current_latitude: Option<f64>,
    pub current_longitude: Option<f64>,
    pub vehicle: Option<VehicleDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleDetails {
    pub id: DbId,
    pub model: String,
    pub color: String,
    pub license_plate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassengerDetails {
    pub average_rating: f64,
    pub total_rides: i32,
}

/// An account with its optional driver and passenger profiles.
struct Profile {
    account: Account,
    driver: Option<Driver>,
    vehicle: Option<Vehicle>,
    passenger: Option<Passenger>,
}

impl Profile {
    async fn load(conn: &mut PgConnection, account: Account) -> Result<Self, sqlx::Error> {
        let driver = DriverRepo::find_by_account_id(&mut *conn, account.id).await?;
        let vehicle = match &driver {
            Some(d) => VehicleRepo::find_by_driver_id(&mut *conn, d.id).await?,
            None => None,
        };
        let passenger = PassengerRepo::find_by_account_id(&mut *conn, account.id).await?;
        Ok(Self {
            account,
            driver,
            vehicle,
            passenger,
        })
    }

    fn driver_status(&self) -> Result<Option<DriverStatus>, CoreError> {
        self.driver.as_ref().map(Driver::status).transpose()
    }

    fn user_info(&self, is_admin: bool) -> Result<UserInfo, CoreError> {
        let account = &self.account;
        Ok(UserInfo {
            id: account.id,
            email: account.email.clone(),
            phone: account.phone.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            profile_image: account.profile_image.clone(),
            is_admin,
            is_driver: self.driver.is_some(),
            is_passenger: self.passenger.is_some(),
            driver_id: self.driver.as_ref().map(|d| d.id),
            driver_status: self.driver_status()?,
            passenger_id: self.passenger.as_ref().map(|p| p.id),
            driver_details: self.driver.as_ref().map(|d| DriverDetails {
                license_number: d.license_number.clone(),
                license_expiry_date: d.license_expiry_date,
                average_rating: d.average_rating,
                total_rides: d.total_rides,
                is_online: d.is_online,
                is_available: d.is_available,
                current_latitude: d.current_latitude,
                current_longitude: d.current_longitude,
                vehicle: self.vehicle.as_ref().map(|v| VehicleDetails {
                    id: v.id,
                    model: v.model.clone(),
                    color: v.color.clone(),
                    license_plate: v.license_plate.clone(),
                }),
            }),
            passenger_details: self.passenger.as_ref().map(|p| PassengerDetails {
                average_rating: p.average_rating,
                total_rides: p.total_rides,
            }),
        })
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

pub struct AuthService {
    pool: DbPool,
    jwt: JwtConfig,
    lockout: LockoutPolicy,
    admin_emails: HashSet<String>,
    revoked_retention: chrono::Duration,
    clock: Arc<dyn Clock>,
    audit: AuthAuditLog,
    notifier: Arc<dyn Notifier>,
    wallets: Arc<dyn WalletProvisioner>,
    user_info: TtlCache<DbId, UserInfo>,
}

impl AuthService {
    pub fn new(
        pool: DbPool,
        config: &ServerConfig,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
        wallets: Arc<dyn WalletProvisioner>,
    ) -> Self {
        let cache_ttl = chrono::Duration::from_std(config.auth.user_info_cache_ttl)
            .unwrap_or_else(|_| chrono::Duration::seconds(5));
        Self {
            audit: AuthAuditLog::new(pool.clone()),
            pool,
            jwt: config.jwt.clone(),
            lockout: config.auth.lockout,
            admin_emails: config
                .auth
                .admin_emails
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
            revoked_retention: chrono::Duration::days(
                config.session_cleanup.revoked_retention_days,
            ),
            user_info: TtlCache::new(cache_ttl, clock.clone()),
            clock,
            notifier,
            wallets,
        }
    }

    /// Create an account with exactly one passenger or driver profile and
    /// issue the first token pair.
    pub async fn register(&self, input: RegisterInput, meta: &RequestMeta) -> AppResult<AuthTokens> {
        let email = normalize_email(&input.email);
        let phone = input.phone.trim().to_string();

        if let Err(msg) = validate_password_strength(&input.password, MIN_PASSWORD_LENGTH) {
            self.record(AuthEvent::failure(AuthAction::Register, &email, &msg), meta)
                .await;
            return Err(AppError::validation(msg));
        }

        if AccountRepo::find_by_email(&self.pool, &email).await?.is_some() {
            return Err(self.register_conflict(&email, Field::Email, meta).await);
        }
        if AccountRepo::find_by_phone(&self.pool, &phone).await?.is_some() {
            return Err(self.register_conflict(&email, Field::Phone, meta).await);
        }

        let password_hash = hash_password(&input.password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
        let now = self.clock.now();

        let mut tx = begin_read_committed(&self.pool).await?;
        let created = AccountRepo::create(
            &mut *tx,
            &CreateAccount {
                email: email.clone(),
                phone,
                password_hash,
                first_name: input.first_name.trim().to_string(),
                last_name: input.last_name.trim().to_string(),
                profile_image: input.profile_image,
            },
        )
        .await;

        // A concurrent registration can still win between the lookups above
        // and this insert; the unique constraint is the final judge.
        let account = match created {
            Ok(account) => account,
            Err(e) => {
                return Err(match unique_violation(&e) {
                    Some("uq_accounts_email") => {
                        self.register_conflict(&email, Field::Email, meta).await
                    }
                    Some("uq_accounts_phone") => {
                        self.register_conflict(&email, Field::Phone, meta).await
                    }
                    _ => e.into(),
                });
            }
        };

        let driver = match input.user_type {
            UserType::Passenger => {
                PassengerRepo::create(&mut *tx, account.id).await?;
                None
            }
            UserType::Driver => Some(
                DriverRepo::create(
                    &mut *tx,
                    &CreateDriver {
                        account_id: account.id,
                        license_number: format!("TEMP-{}", account.id),
                        license_expiry_date: now
                            + chrono::Duration::days(TEMP_LICENSE_VALIDITY_DAYS),
                    },
                )
                .await?,
            ),
        };
        tx.commit().await?;

        tracing::info!(account_id = account.id, user_type = ?input.user_type, "Account registered");

        self.provision_wallet(account.id);
        if let Some(driver) = &driver {
            dispatch(
                self.notifier.clone(),
                Notification::DriverApplicationReceived {
                    driver_id: driver.id,
                    account_id: account.id,
                    email: account.email.clone(),
                    full_name: account.full_name(),
                },
            );
        }

        self.record(
            AuthEvent::success(AuthAction::Register, &email).account(account.id),
            meta,
        )
        .await;

        let mut conn = self.pool.acquire().await?;
        let tokens = self.issue_tokens(&mut conn, account, None, meta).await?;
        self.user_info.insert(tokens.user.id, tokens.user.clone());
        Ok(tokens)
    }

    /// Verify credentials, applying the lockout policy.
    pub async fn login(&self, email: &str, password: &str, meta: &RequestMeta) -> AppResult<AuthTokens> {
        let email = normalize_email(email);
        let now = self.clock.now();

        let Some(account) = AccountRepo::find_by_email(&self.pool, &email).await? else {
            self.record(
                AuthEvent::failure(AuthAction::Login, &email, "Unknown email"),
                meta,
            )
            .await;
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if let Some(minutes) = self.lockout.remaining_lock_minutes(account.locked_until, now) {
            self.record(
                AuthEvent::failure(
                    AuthAction::Login,
                    &email,
                    format!("Account locked for {minutes} more minutes"),
                )
                .account(account.id),
                meta,
            )
            .await;
            return Err(AppError::unauthorized(format!(
                "Account temporarily locked. Try again in {minutes} minutes."
            )));
        }

        let valid = verify_password(password, &account.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

        if !valid {
            let attempt = AccountRepo::record_failed_login(
                &self.pool,
                account.id,
                self.lockout.max_failed_attempts,
                self.lockout.lock_deadline(now),
            )
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Account",
                id: account.id,
            })?;
            let attempts = attempt.failed_login_count;

            if self.lockout.locks_at(attempts) {
                tracing::warn!(account_id = account.id, attempts, "Account locked");
                self.record(
                    AuthEvent::failure(
                        AuthAction::AccountLocked,
                        &email,
                        format!("Locked after {attempts} failed attempts"),
                    )
                    .account(account.id),
                    meta,
                )
                .await;
                return Err(AppError::unauthorized(format!(
                    "Account locked for {} minutes after repeated failed attempts.",
                    self.lockout.lock_duration.num_minutes()
                )));
            }

            self.record(
                AuthEvent::failure(
                    AuthAction::Login,
                    &email,
                    format!(
                        "Invalid password (attempt {attempts}/{})",
                        self.lockout.max_failed_attempts
                    ),
                )
                .account(account.id),
                meta,
            )
            .await;
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        AccountRepo::record_successful_login(&self.pool, account.id).await?;
        self.record(
            AuthEvent::success(AuthAction::Login, &email).account(account.id),
            meta,
        )
        .await;

        let mut conn = self.pool.acquire().await?;
        let tokens = self.issue_tokens(&mut conn, account, None, meta).await?;
        self.user_info.insert(tokens.user.id, tokens.user.clone());
        Ok(tokens)
    }

    /// Exchange a refresh token for a new pair. The presented token is
    /// revoked whether or not the caller ever uses the new one.
    pub async fn refresh(&self, refresh_token: &str, meta: &RequestMeta) -> AppResult<AuthTokens> {
        let now = self.clock.now();
        let token_hash = sha256_hex(refresh_token.as_bytes());

        let mut tx = begin_read_committed(&self.pool).await?;

        let Some(session) = SessionRepo::find_by_token_hash(&mut *tx, &token_hash).await? else {
            tx.rollback().await?;
            // No session means no known account; the row carries no email.
            self.record(
                AuthEvent::failure(AuthAction::RefreshToken, "", "Unknown token"),
                meta,
            )
            .await;
            return Err(AppError::unauthorized(INVALID_REFRESH_TOKEN));
        };
        let Some(account) = AccountRepo::find_by_id(&mut *tx, session.account_id).await? else {
            tx.rollback().await?;
            self.record(
                AuthEvent::failure(AuthAction::RefreshToken, "", "Account not found"),
                meta,
            )
            .await;
            return Err(AppError::unauthorized(INVALID_REFRESH_TOKEN));
        };

        let rejection = match session.state(now) {
            SessionState::Active => None,
            SessionState::Revoked => Some(("Token revoked", "Refresh token has been revoked")),
            SessionState::Expired => Some(("Token expired", "Refresh token has expired")),
        };
        if let Some((reason, message)) = rejection {
            tx.rollback().await?;
            self.record(
                AuthEvent::failure(AuthAction::RefreshToken, &account.email, reason)
                    .account(account.id),
                meta,
            )
            .await;
            return Err(AppError::unauthorized(message));
        }

        // Conditional on `revoked_at IS NULL`: a concurrent refresh of the
        // same token that got here first leaves nothing to revoke.
        if !SessionRepo::revoke(&mut *tx, session.id, now).await? {
            tx.rollback().await?;
            tracing::warn!(account_id = account.id, session_id = session.id, "Refresh token replayed");
            self.record(
                AuthEvent::failure(AuthAction::RefreshToken, &account.email, "Token revoked")
                    .account(account.id),
                meta,
            )
            .await;
            return Err(AppError::unauthorized("Refresh token has been revoked"));
        }

        let email = account.email.clone();
        let account_id = account.id;
        let tokens = self
            .issue_tokens(&mut tx, account, Some(session.token_hash), meta)
            .await?;
        tx.commit().await?;

        self.record(
            AuthEvent::success(AuthAction::RefreshToken, &email).account(account_id),
            meta,
        )
        .await;
        self.user_info.insert(account_id, tokens.user.clone());
        Ok(tokens)
    }

    /// Revoke every live session of the account. Idempotent.
    pub async fn logout(&self, account_id: DbId, meta: &RequestMeta) -> AppResult<u64> {
        let revoked =
            SessionRepo::revoke_all_for_account(&self.pool, account_id, self.clock.now()).await?;
        self.clear_user_cache(account_id);

        if let Some(account) = AccountRepo::find_by_id(&self.pool, account_id).await? {
            self.record(
                AuthEvent::success(AuthAction::Logout, &account.email).account(account_id),
                meta,
            )
            .await;
        }

        tracing::info!(account_id, revoked, "Logged out");
        Ok(revoked)
    }

    /// Composed profile, served from the short-lived cache when fresh.
    pub async fn get_user_info(&self, account_id: DbId) -> AppResult<UserInfo> {
        if let Some(info) = self.user_info.get(&account_id) {
            return Ok(info);
        }

        let mut conn = self.pool.acquire().await?;
        let account = AccountRepo::find_by_id(&mut *conn, account_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Account",
                id: account_id,
            })?;
        let profile = Profile::load(&mut conn, account).await?;
        let info = profile.user_info(self.is_admin(&profile.account))?;

        self.user_info.insert(account_id, info.clone());
        Ok(info)
    }

    pub fn clear_user_cache(&self, account_id: DbId) {
        self.user_info.invalidate(&account_id);
    }

    pub fn clear_all_cache(&self) {
        self.user_info.clear();
    }

    /// Admin approval flow. Drops the driver's cached profile and notifies
    /// the driver.
    pub async fn update_driver_status(&self, driver_id: DbId, status: DriverStatus) -> AppResult<Driver> {
        let driver = DriverRepo::update_status(&self.pool, driver_id, status)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Driver",
                id: driver_id,
            })?;

        self.clear_user_cache(driver.account_id);

        if let Some(account) = AccountRepo::find_by_id(&self.pool, driver.account_id).await? {
            dispatch(
                self.notifier.clone(),
                Notification::DriverStatusChanged {
                    driver_id,
                    account_id: account.id,
                    email: account.email,
                    status,
                },
            );
        }

        tracing::info!(driver_id, status = %status, "Driver status updated");
        Ok(driver)
    }

    /// Start a password reset. Unknown emails succeed silently so the
    /// response does not reveal which addresses are registered.
    pub async fn forgot_password(&self, email: &str, meta: &RequestMeta) -> AppResult<()> {
        let email = normalize_email(email);
        let Some(account) = AccountRepo::find_by_email(&self.pool, &email).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let now = self.clock.now();
        let reset_token = jwt::generate_reset_token(account.id, generate_jti(), now, &self.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

        self.record(
            AuthEvent::success(AuthAction::PasswordReset, &email).account(account.id),
            meta,
        )
        .await;

        dispatch(
            self.notifier.clone(),
            Notification::PasswordResetRequested {
                account_id: account.id,
                email: account.email,
                reset_token,
                expires_at: self.jwt.reset_expiry(now),
            },
        );
        Ok(())
    }

    /// Complete a reset: new password, failed counter and lock cleared.
    pub async fn reset_password(&self, token: &str, new_password: &str, meta: &RequestMeta) -> AppResult<()> {
        validate_password_strength(new_password, MIN_PASSWORD_LENGTH).map_err(AppError::validation)?;

        let account_id = jwt::validate_reset_token(token, &self.jwt)
            .map_err(|_| AppError::unauthorized(INVALID_RESET_TOKEN))?;
        let account = AccountRepo::find_by_id(&self.pool, account_id)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_RESET_TOKEN))?;

        let password_hash = hash_password(new_password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
        AccountRepo::reset_password(&self.pool, account.id, &password_hash).await?;

        self.record(
            AuthEvent::success(AuthAction::PasswordChange, &account.email).account(account.id),
            meta,
        )
        .await;
        self.clear_user_cache(account.id);
        Ok(())
    }

    pub async fn change_password(
        &self,
        account_id: DbId,
        current_password: &str,
        new_password: &str,
        meta: &RequestMeta,
    ) -> AppResult<()> {
        validate_password_strength(new_password, MIN_PASSWORD_LENGTH).map_err(AppError::validation)?;

        let account = AccountRepo::find_by_id(&self.pool, account_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Account",
                id: account_id,
            })?;

        let valid = verify_password(current_password, &account.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
        if !valid {
            self.record(
                AuthEvent::failure(
                    AuthAction::PasswordChange,
                    &account.email,
                    "Current password incorrect",
                )
                .account(account.id),
                meta,
            )
            .await;
            return Err(AppError::unauthorized("Current password is incorrect"));
        }

        let password_hash = hash_password(new_password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
        AccountRepo::update_password(&self.pool, account.id, &password_hash).await?;

        self.record(
            AuthEvent::success(AuthAction::PasswordChange, &account.email).account(account.id),
            meta,
        )
        .await;
        Ok(())
    }

    /// Delete expired sessions and sessions revoked longer ago than the
    /// retention window. Returns the number removed.
    pub async fn clean_expired_sessions(&self) -> AppResult<u64> {
        let now = self.clock.now();
        let deleted =
            SessionRepo::cleanup_expired(&self.pool, now, now - self.revoked_retention).await?;
        Ok(deleted)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Sign an access token and persist a fresh refresh session.
    ///
    /// `replaced_by` is the hash of the token this pair rotates out.
    async fn issue_tokens(
        &self,
        conn: &mut PgConnection,
        account: Account,
        replaced_by: Option<String>,
        meta: &RequestMeta,
    ) -> AppResult<AuthTokens> {
        let now = self.clock.now();
        let profile = Profile::load(conn, account).await?;
        let is_admin = self.is_admin(&profile.account);

        let claims = Claims {
            sub: profile.account.id,
            email: profile.account.email.clone(),
            jti: generate_jti(),
            iat: now.timestamp(),
            exp: self.jwt.access_expiry(now).timestamp(),
            token_type: TokenType::Access,
            is_driver: profile.driver.is_some(),
            is_passenger: profile.passenger.is_some(),
            driver_id: profile.driver.as_ref().map(|d| d.id),
            driver_status: profile.driver_status()?,
            passenger_id: profile.passenger.as_ref().map(|p| p.id),
            is_admin,
        };
        let access_token = jwt::sign(&claims, &self.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

        let refresh_token = generate_refresh_token();
        SessionRepo::create(
            &mut *conn,
            &CreateSession {
                account_id: profile.account.id,
                token_hash: sha256_hex(refresh_token.as_bytes()),
                expires_at: self.jwt.refresh_expiry(now),
                replaced_by,
                ip_address: meta.ip_address.clone(),
                user_agent: meta.user_agent.clone(),
            },
        )
        .await?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer",
            expires_in: self.jwt.access_token_expiry_mins * 60,
            user: profile.user_info(is_admin)?,
        })
    }

    fn is_admin(&self, account: &Account) -> bool {
        account.is_admin || self.admin_emails.contains(&account.email.to_lowercase())
    }

    async fn record(&self, event: AuthEvent, meta: &RequestMeta) {
        self.audit
            .record(event.request(meta.ip_address.clone(), meta.user_agent.clone()))
            .await;
    }

    async fn register_conflict(&self, email: &str, field: Field, meta: &RequestMeta) -> AppError {
        let message = match field {
            Field::Email => "Email already registered",
            Field::Phone => "Phone already registered",
        };
        self.record(AuthEvent::failure(AuthAction::Register, email, message), meta)
            .await;
        AppError::conflict(message)
    }

    /// Best effort, off the request path.
    fn provision_wallet(&self, account_id: DbId) {
        let wallets = self.wallets.clone();
        tokio::spawn(async move {
            if let Err(e) = wallets.provision(account_id).await {
                tracing::warn!(account_id, error = %e, "Wallet provisioning failed");
            }
        });
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Email,
    Phone,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Name of the violated unique constraint, if `err` is one.
fn unique_violation(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            db_err.constraint()
        }
        _ => None,
    }
}
