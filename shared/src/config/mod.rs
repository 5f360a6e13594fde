//! Configuration module with business-specific sub-modules
//!
//! - `auth` - token lifetimes, signing key location, admin allow-list
//! - `cache` - Redis connection for login state
//! - `database` - PostgreSQL connection pool
//! - `environment` - environment detection
//! - `oauth` - Google OAuth client settings
//! - `server` - HTTP bind address and CORS
//! - `timeouts` - storage and provider call timeouts

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod oauth;
pub mod server;
pub mod timeouts;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use oauth::GoogleOAuthConfig;
pub use server::{CorsConfig, ServerConfig};
pub use timeouts::TimeoutConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub auth: AuthConfig,
    pub google: GoogleOAuthConfig,
    pub timeouts: TimeoutConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            auth: AuthConfig::default(),
            google: GoogleOAuthConfig::default(),
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            cors: CorsConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            auth: AuthConfig::from_env(),
            google: GoogleOAuthConfig::from_env(),
            timeouts: TimeoutConfig::from_env(),
        }
    }
}

/// Read a variable, falling back to `default` when unset
pub(crate) fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read a variable and parse it, falling back to `default` when unset or invalid
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Split a comma separated list, dropping blanks
pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
