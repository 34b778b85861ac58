//! Ride-hailing domain core: shared types, errors, and pure policy logic.
//!
//! Nothing in this crate performs I/O; the DB, cache, and API crates build
//! on it.

pub mod clock;
pub mod error;
pub mod geo;
pub mod hashing;
pub mod lockout;
pub mod status;
pub mod types;
