//! Request extractors.
//!
//! - [`auth::AuthUser`] -- verified access-token claims.
//! - [`rbac::RequireAdmin`] / [`rbac::RequireDriver`] -- role gates.
//! - [`request_meta::RequestMeta`] -- client IP and user agent for sessions
//!   and the audit trail.

pub mod auth;
pub mod rbac;
pub mod request_meta;
