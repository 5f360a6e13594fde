//! Redis configuration for the login state store

use serde::{Deserialize, Serialize};

/// Redis connection settings
///
/// When `url` is `None` the server keeps pending logins in process memory,
/// which only works for a single instance.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: Option<String>,

    /// Key prefix for pending login entries
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("REDIS_URL").ok().filter(|v| !v.trim().is_empty()),
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_key_prefix() -> String {
    String::from("idp:login_state:")
}
