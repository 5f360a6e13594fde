//! Configuration for the token services

use std::time::Duration;

use idp_shared::config::{JwtConfig, TimeoutConfig};

/// Configuration shared by issuer, rotator and validator
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// `iss` claim written and required
    pub issuer: String,
    /// Access token lifetime in seconds
    pub access_token_ttl: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_ttl: i64,
    /// bcrypt cost for refresh token secrets
    pub hash_cost: u32,
    /// Deadline for each storage call
    pub storage_timeout: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            issuer: "auth-service".to_string(),
            access_token_ttl: 15 * 60,
            refresh_token_ttl: 7 * 24 * 60 * 60,
            hash_cost: bcrypt::DEFAULT_COST,
            storage_timeout: Duration::from_secs(5),
        }
    }
}

impl TokenServiceConfig {
    pub fn from_config(jwt: &JwtConfig, timeouts: &TimeoutConfig) -> Self {
        Self {
            issuer: jwt.issuer.clone(),
            access_token_ttl: jwt.access_token_ttl,
            refresh_token_ttl: jwt.refresh_token_ttl,
            hash_cost: jwt.refresh_token_hash_cost,
            storage_timeout: timeouts.storage(),
        }
    }
}
