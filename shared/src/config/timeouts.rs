//! Timeouts for outbound calls

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::env_parse;

/// Per-call timeouts for storage and the OAuth provider
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimeoutConfig {
    /// Storage call timeout in milliseconds
    pub storage_ms: u64,
    /// OAuth provider call timeout in milliseconds
    pub oauth_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            storage_ms: 5_000,
            oauth_ms: 10_000,
        }
    }
}

impl TimeoutConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            storage_ms: env_parse("STORAGE_TIMEOUT_MS", 5_000),
            oauth_ms: env_parse("OAUTH_TIMEOUT_MS", 10_000),
        }
    }

    pub fn storage(&self) -> Duration {
        Duration::from_millis(self.storage_ms)
    }

    pub fn oauth(&self) -> Duration {
        Duration::from_millis(self.oauth_ms)
    }
}
