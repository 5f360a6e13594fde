//! Adaptive hashing of refresh token secrets

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;

use crate::errors::{DomainError, DomainResult, TokenError};

/// Number of random bytes in a refresh token secret
const SECRET_BYTES: usize = 32;

/// bcrypt hashing for refresh token secrets
///
/// Hashing and verification run on the blocking pool so request workers are
/// not stalled by the deliberately slow hash.
#[derive(Debug, Clone, Copy)]
pub struct RefreshTokenHasher {
    cost: u32,
}

impl RefreshTokenHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// 256 random bits from the OS, base64url encoded
    pub fn generate_secret() -> String {
        let mut bytes = [0u8; SECRET_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    pub async fn hash(&self, secret: String) -> DomainResult<String> {
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(secret, cost))
            .await
            .map_err(|e| DomainError::internal(format!("hash task failed: {}", e)))?
            .map_err(|e| {
                DomainError::Token(TokenError::SigningFailed {
                    message: format!("refresh token hashing failed: {}", e),
                })
            })
    }

    /// Constant-effort comparison of a presented secret with a stored hash
    pub async fn verify(&self, secret: String, hash: String) -> DomainResult<bool> {
        tokio::task::spawn_blocking(move || bcrypt::verify(secret, &hash).unwrap_or(false))
            .await
            .map_err(|e| DomainError::internal(format!("hash task failed: {}", e)))
    }
}
