//! Authentication and token configuration

use serde::{Deserialize, Serialize};

use super::{env_or, env_parse, split_csv};
use crate::utils::duration::parse_duration_secs;

/// JWT and refresh token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Access token lifetime in seconds
    pub access_token_ttl: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_ttl: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// Path to the PEM encoded RSA private key
    pub private_key_path: String,

    /// bcrypt cost used when hashing refresh token secrets
    pub refresh_token_hash_cost: u32,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_token_ttl: 900,      // 15 minutes
            refresh_token_ttl: 604_800, // 7 days
            issuer: String::from("auth-service"),
            private_key_path: String::from("./keys/private_key.pem"),
            refresh_token_hash_cost: 12,
        }
    }
}

impl JwtConfig {
    /// Create from environment variables
    ///
    /// Lifetimes accept duration strings such as `15m` or `168h`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let access_token_ttl = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| parse_duration_secs(&v))
            .unwrap_or(defaults.access_token_ttl);
        let refresh_token_ttl = std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| parse_duration_secs(&v))
            .unwrap_or(defaults.refresh_token_ttl);

        Self {
            access_token_ttl,
            refresh_token_ttl,
            issuer: env_or("JWT_ISSUER", &defaults.issuer),
            private_key_path: env_or("JWT_PRIVATE_KEY_PATH", &defaults.private_key_path),
            refresh_token_hash_cost: env_parse(
                "REFRESH_TOKEN_HASH_COST",
                defaults.refresh_token_hash_cost,
            ),
        }
    }

    /// Set access token lifetime in minutes
    pub fn with_access_ttl_minutes(mut self, minutes: i64) -> Self {
        self.access_token_ttl = minutes * 60;
        self
    }

    /// Set refresh token lifetime in days
    pub fn with_refresh_ttl_days(mut self, days: i64) -> Self {
        self.refresh_token_ttl = days * 86_400;
        self
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Emails promoted to admin on login
    #[serde(default)]
    pub admin_emails: Vec<String>,

    /// Lifetime of a pending OAuth login (CSRF state) in seconds
    pub login_state_ttl: i64,

    /// Persist audit events to `auth_audit_log`; otherwise they are logged
    #[serde(default = "default_true")]
    pub audit_log_table: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            admin_emails: Vec::new(),
            login_state_ttl: 600,
            audit_log_table: true,
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            admin_emails: split_csv(&env_or("ADMIN_EMAILS", "")),
            login_state_ttl: env_parse("LOGIN_STATE_TTL_SECS", 600),
            audit_log_table: env_parse("AUDIT_LOG_TABLE", true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_ttl, 900);
        assert_eq!(config.refresh_token_ttl, 604_800);
        assert_eq!(config.issuer, "auth-service");
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::default()
            .with_access_ttl_minutes(30)
            .with_refresh_ttl_days(14);
        assert_eq!(config.access_token_ttl, 1800);
        assert_eq!(config.refresh_token_ttl, 1_209_600);
    }
}
