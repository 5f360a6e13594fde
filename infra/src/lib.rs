//! # Infrastructure Layer
//!
//! Concrete adapters for the ports defined in `idp_core`:
//! - **Database**: PostgreSQL repositories and audit sink using SQLx
//! - **Cache**: Redis-backed login state store
//! - **OAuth**: Google authorization code flow over reqwest
//!
//! ## Features
//!
//! - `postgres`: Enable PostgreSQL support (default)
//! - `redis-cache`: Enable the Redis login state store (default)

/// Database module - PostgreSQL implementations using SQLx
#[cfg(feature = "postgres")]
pub mod database;

/// Cache module - Redis login state store
#[cfg(feature = "redis-cache")]
pub mod cache;

/// OAuth provider clients
pub mod oauth;

pub use oauth::GoogleOAuthProvider;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or migration error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
