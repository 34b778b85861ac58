//! SHA-256 digests and random opaque tokens.
//!
//! Refresh tokens are opaque random strings; only their SHA-256 digest is
//! persisted, so the `sessions` table never holds a usable credential.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Bytes of entropy in a refresh token (512 bits).
pub const REFRESH_TOKEN_BYTES: usize = 64;

/// Bytes of entropy in a token id (`jti`).
pub const JTI_BYTES: usize = 16;

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Generate `n` cryptographically random bytes, hex encoded.
pub fn random_hex(n: usize) -> String {
    let mut bytes = vec![0u8; n];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(&bytes)
}

/// A fresh refresh-token value: [`REFRESH_TOKEN_BYTES`] random bytes as hex.
pub fn generate_refresh_token() -> String {
    random_hex(REFRESH_TOKEN_BYTES)
}

/// A fresh `jti` claim value.
pub fn generate_jti() -> String {
    random_hex(JTI_BYTES)
}

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }
}
