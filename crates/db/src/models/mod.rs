//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts

pub mod account;
pub mod auth_log;
pub mod location;
pub mod ride;
pub mod session;
