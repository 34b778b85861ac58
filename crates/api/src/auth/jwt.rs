//! HS256 access and password-reset tokens.
//!
//! Both token kinds share one signing key and carry a `type` claim; each
//! validator rejects the other kind, so a reset link can never be used as a
//! bearer token. Refresh tokens are opaque and live in
//! [`ridehail_core::hashing`].

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use ridehail_core::status::DriverStatus;
use ridehail_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Reset,
}

/// Claims embedded in every access token.
///
/// Driver and passenger linkage are a snapshot taken at issuance; a status
/// change is visible to the client after the next refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: DbId,
    pub email: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub is_driver: bool,
    pub is_passenger: bool,
    pub driver_id: Option<DbId>,
    pub driver_status: Option<DriverStatus>,
    pub passenger_id: Option<DbId>,
    pub is_admin: bool,
}

/// Claims of a password-reset token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetClaims {
    pub sub: DbId,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
    pub reset_token_expiry_mins: i64,
}

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 30;
const DEFAULT_RESET_EXPIRY_MINS: i64 = 60;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                   | Required | Default |
    /// |---------------------------|----------|---------|
    /// | `JWT_SECRET`              | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`  | no       | `15`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS` | no       | `30`    |
    /// | `JWT_RESET_EXPIRY_MINS`   | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is unset or empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self {
            secret,
            access_token_expiry_mins: crate::config::env_or(
                "JWT_ACCESS_EXPIRY_MINS",
                DEFAULT_ACCESS_EXPIRY_MINS,
            ),
            refresh_token_expiry_days: crate::config::env_or(
                "JWT_REFRESH_EXPIRY_DAYS",
                DEFAULT_REFRESH_EXPIRY_DAYS,
            ),
            reset_token_expiry_mins: crate::config::env_or(
                "JWT_RESET_EXPIRY_MINS",
                DEFAULT_RESET_EXPIRY_MINS,
            ),
        }
    }

    /// Configuration with the default lifetimes and the given secret.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry_mins: DEFAULT_ACCESS_EXPIRY_MINS,
            refresh_token_expiry_days: DEFAULT_REFRESH_EXPIRY_DAYS,
            reset_token_expiry_mins: DEFAULT_RESET_EXPIRY_MINS,
        }
    }

    pub fn access_expiry(&self, issued_at: Timestamp) -> Timestamp {
        issued_at + chrono::Duration::minutes(self.access_token_expiry_mins)
    }

    pub fn refresh_expiry(&self, issued_at: Timestamp) -> Timestamp {
        issued_at + chrono::Duration::days(self.refresh_token_expiry_days)
    }

    pub fn reset_expiry(&self, issued_at: Timestamp) -> Timestamp {
        issued_at + chrono::Duration::minutes(self.reset_token_expiry_mins)
    }
}

/// Sign any claim set with the configured secret (HS256).
pub fn sign<T: Serialize>(claims: &T, config: &JwtConfig) -> Result<String, JwtError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

fn decode_claims<T: for<'de> Deserialize<'de>>(token: &str, config: &JwtConfig) -> Result<T, JwtError> {
    let data = decode::<T>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Verify signature and expiry of an access token.
pub fn validate_access_token(token: &str, config: &JwtConfig) -> Result<Claims, JwtError> {
    let claims: Claims = decode_claims(token, config)?;
    if claims.token_type != TokenType::Access {
        return Err(ErrorKind::InvalidToken.into());
    }
    Ok(claims)
}

/// Sign a password-reset token for `account_id`.
pub fn generate_reset_token(
    account_id: DbId,
    jti: String,
    issued_at: Timestamp,
    config: &JwtConfig,
) -> Result<String, JwtError> {
    let claims = ResetClaims {
        sub: account_id,
        jti,
        iat: issued_at.timestamp(),
        exp: config.reset_expiry(issued_at).timestamp(),
        token_type: TokenType::Reset,
    };
    sign(&claims, config)
}

/// Verify a password-reset token and return the account it was issued for.
pub fn validate_reset_token(token: &str, config: &JwtConfig) -> Result<DbId, JwtError> {
    let claims: ResetClaims = decode_claims(token, config)?;
    if claims.token_type != TokenType::Reset {
        return Err(ErrorKind::InvalidToken.into());
    }
    Ok(claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_config() -> JwtConfig {
        JwtConfig::with_secret("test-secret-that-is-long-enough-for-hmac")
    }

    fn access_claims(issued_at: Timestamp) -> Claims {
        Claims {
            sub: 42,
            email: "driver@example.com".into(),
            jti: "abc".into(),
            iat: issued_at.timestamp(),
            exp: test_config().access_expiry(issued_at).timestamp(),
            token_type: TokenType::Access,
            is_driver: true,
            is_passenger: false,
            driver_id: Some(7),
            driver_status: Some(DriverStatus::Approved),
            passenger_id: None,
            is_admin: false,
        }
    }

    #[test]
    fn access_token_round_trips_claims() {
        let config = test_config();
        let claims = access_claims(Utc::now());
        let token = sign(&claims, &config).unwrap();
        assert_eq!(validate_access_token(&token, &config).unwrap(), claims);
    }

    #[test]
    fn expired_access_token_fails() {
        let config = test_config();
        // Well past the default 60-second leeway.
        let claims = access_claims(Utc::now() - chrono::Duration::hours(1));
        let token = sign(&claims, &config).unwrap();
        assert!(validate_access_token(&token, &config).is_err());
    }

    #[test]
    fn different_secret_fails() {
        let token = sign(&access_claims(Utc::now()), &test_config()).unwrap();
        let other = JwtConfig::with_secret("another-secret");
        assert!(validate_access_token(&token, &other).is_err());
    }

    #[test]
    fn reset_token_is_not_an_access_token() {
        let config = test_config();
        let token = generate_reset_token(42, "j".into(), Utc::now(), &config).unwrap();
        assert_eq!(validate_reset_token(&token, &config).unwrap(), 42);
        assert!(validate_access_token(&token, &config).is_err());
    }

    #[test]
    fn access_token_is_not_a_reset_token() {
        let config = test_config();
        let token = sign(&access_claims(Utc::now()), &config).unwrap();
        assert!(validate_reset_token(&token, &config).is_err());
    }

    #[test]
    fn reset_token_expires_after_configured_window() {
        let config = test_config();
        let issued = Utc::now() - chrono::Duration::minutes(62);
        let token = generate_reset_token(42, "j".into(), issued, &config).unwrap();
        assert!(validate_reset_token(&token, &config).is_err());
    }
}
