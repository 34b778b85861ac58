//! Credential primitives.
//!
//! - [`password`] -- Argon2id hashing and verification.
//! - [`jwt`] -- access and reset token signing and validation.

pub mod jwt;
pub mod password;
