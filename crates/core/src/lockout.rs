//! Login lockout policy.
//!
//! After `max_failed_attempts` consecutive failures an account is locked for
//! `lock_duration`. The lock is checked before the password is compared.

use chrono::Duration;

use crate::types::Timestamp;

/// Default consecutive failures before locking.
pub const DEFAULT_MAX_FAILED_ATTEMPTS: i32 = 5;

/// Default lock window in minutes.
pub const DEFAULT_LOCK_DURATION_MINS: i64 = 30;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutPolicy {
    pub max_failed_attempts: i32,
    pub lock_duration: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_failed_attempts: DEFAULT_MAX_FAILED_ATTEMPTS,
            lock_duration: Duration::minutes(DEFAULT_LOCK_DURATION_MINS),
        }
    }
}

impl LockoutPolicy {
    /// Whole minutes (rounded up) left on an active lock, or `None` when the
    /// account is not locked at `now`.
    pub fn remaining_lock_minutes(
        &self,
        locked_until: Option<Timestamp>,
        now: Timestamp,
    ) -> Option<i64> {
        let until = locked_until.filter(|until| *until > now)?;
        let remaining_secs = (until - now).num_seconds();
        Some(((remaining_secs + 59) / 60).max(1))
    }

    /// Whether a failure counter at `attempts` puts the account under lock.
    pub fn locks_at(&self, attempts: i32) -> bool {
        attempts >= self.max_failed_attempts
    }

    /// Deadline for a lock that starts at `now`.
    pub fn lock_deadline(&self, now: Timestamp) -> Timestamp {
        now + self.lock_duration
    }
}

/// Validate that a password meets minimum strength requirements.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    if password.chars().count() < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn fifth_failure_locks_for_thirty_minutes() {
        let policy = LockoutPolicy::default();
        let now = Utc::now();

        for attempts in 1..5 {
            assert!(!policy.locks_at(attempts), "attempt {attempts} must not lock");
        }
        assert!(policy.locks_at(5));
        assert!(policy.locks_at(9));
        assert_eq!(policy.lock_deadline(now), now + Duration::minutes(30));
    }

    #[test]
    fn remaining_minutes_rounds_up() {
        let policy = LockoutPolicy::default();
        let now = Utc::now();

        let until = now + Duration::seconds(61);
        assert_eq!(policy.remaining_lock_minutes(Some(until), now), Some(2));

        let until = now + Duration::minutes(30);
        assert_eq!(policy.remaining_lock_minutes(Some(until), now), Some(30));
    }

    #[test]
    fn expired_or_absent_lock_is_not_locked() {
        let policy = LockoutPolicy::default();
        let now = Utc::now();
        assert_eq!(policy.remaining_lock_minutes(None, now), None);
        assert_eq!(policy.remaining_lock_minutes(Some(now), now), None);
        assert_eq!(
            policy.remaining_lock_minutes(Some(now - Duration::seconds(1)), now),
            None
        );
    }

    #[test]
    fn custom_threshold() {
        let policy = LockoutPolicy {
            max_failed_attempts: 2,
            lock_duration: Duration::minutes(5),
        };
        let now = Utc::now();
        assert!(!policy.locks_at(1));
        assert!(policy.locks_at(2));
        assert_eq!(policy.lock_deadline(now), now + Duration::minutes(5));
    }

    #[test]
    fn password_strength() {
        assert!(validate_password_strength("short", MIN_PASSWORD_LENGTH).is_err());
        assert!(validate_password_strength("eightch!", MIN_PASSWORD_LENGTH).is_ok());
        let msg = validate_password_strength("abc", 8).unwrap_err();
        assert!(msg.contains("at least 8 characters"));
    }
}
