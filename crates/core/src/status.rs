//! Status vocabularies shared by the DB and API layers.
//!
//! Values are persisted as upper-case TEXT columns guarded by CHECK
//! constraints, so [`as_str`](DriverStatus::as_str) and
//! [`FromStr`] must stay in sync with the migrations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Driver approval status
// ---------------------------------------------------------------------------

/// Driver onboarding state gating ride eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverStatus {
    Pending,
    Approved,
    Rejected,
    Suspended,
}

impl DriverStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Suspended => "SUSPENDED",
        }
    }

    /// Only approved drivers may go online and accept rides.
    pub fn can_accept_rides(self) -> bool {
        self == Self::Approved
    }
}

impl FromStr for DriverStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "SUSPENDED" => Ok(Self::Suspended),
            other => Err(CoreError::Validation(format!(
                "Invalid driver status '{other}'. Must be one of: PENDING, APPROVED, REJECTED, SUSPENDED"
            ))),
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Ride lifecycle
// ---------------------------------------------------------------------------

/// Ride lifecycle state.
///
/// `REQUESTED -> ACCEPTED -> IN_PROGRESS -> COMPLETED`, with `CANCELLED`
/// reachable from every non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RideStatus {
    Requested,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

impl RideStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "REQUESTED",
            Self::Accepted => "ACCEPTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// A ride the driver is currently serving (ETA is computed for these).
    pub fn is_active(self) -> bool {
        matches!(self, Self::Accepted | Self::InProgress)
    }

    pub fn can_transition_to(self, next: RideStatus) -> bool {
        use RideStatus::*;
        match (self, next) {
            (Requested, Accepted) | (Accepted, InProgress) | (InProgress, Completed) => true,
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl FromStr for RideStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REQUESTED" => Ok(Self::Requested),
            "ACCEPTED" => Ok(Self::Accepted),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Invalid ride status '{other}'"
            ))),
        }
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Auth log actions
// ---------------------------------------------------------------------------

/// Kind of authentication event recorded in `auth_logs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthAction {
    Register,
    Login,
    RefreshToken,
    Logout,
    AccountLocked,
    PasswordReset,
    PasswordChange,
}

impl AuthAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Register => "REGISTER",
            Self::Login => "LOGIN",
            Self::RefreshToken => "REFRESH_TOKEN",
            Self::Logout => "LOGOUT",
            Self::AccountLocked => "ACCOUNT_LOCKED",
            Self::PasswordReset => "PASSWORD_RESET",
            Self::PasswordChange => "PASSWORD_CHANGE",
        }
    }
}

impl fmt::Display for AuthAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Account type at registration
// ---------------------------------------------------------------------------

/// Which profile is created alongside a new account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Passenger,
    Driver,
}
