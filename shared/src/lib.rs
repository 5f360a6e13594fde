//! Shared configuration and common types for the identity provider
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error response structure and error codes
//! - Utility functions (duration parsing, redirect validation)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, CorsConfig, DatabaseConfig, Environment,
    GoogleOAuthConfig, JwtConfig, ServerConfig, TimeoutConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::{duration, redirect};
