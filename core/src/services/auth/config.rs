//! Authentication service configuration

use std::time::Duration;

use idp_shared::AppConfig;

use crate::services::identity::IdentityExchangerConfig;
use crate::services::token::TokenServiceConfig;

/// Configuration for `AuthService`
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    pub token: TokenServiceConfig,
    /// Emails promoted to admin on login
    pub admin_emails: Vec<String>,
    /// Allowed post-login redirect origins
    pub allowed_origins: Vec<String>,
    /// Pending login lifetime in seconds
    pub login_state_ttl: i64,
    pub provider_timeout: Duration,
    pub storage_timeout: Duration,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        let token = TokenServiceConfig::default();
        Self {
            storage_timeout: token.storage_timeout,
            token,
            admin_emails: Vec::new(),
            allowed_origins: vec!["http://localhost:3000".to_string()],
            login_state_ttl: 600,
            provider_timeout: Duration::from_secs(10),
        }
    }
}

impl AuthServiceConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            token: TokenServiceConfig::from_config(&config.auth.jwt, &config.timeouts),
            admin_emails: config.auth.admin_emails.clone(),
            allowed_origins: config.cors.allowed_origins.clone(),
            login_state_ttl: config.auth.login_state_ttl,
            provider_timeout: config.timeouts.oauth(),
            storage_timeout: config.timeouts.storage(),
        }
    }

    pub(crate) fn exchanger(&self) -> IdentityExchangerConfig {
        IdentityExchangerConfig {
            allowed_origins: self.allowed_origins.clone(),
            state_ttl: self.login_state_ttl,
            provider_timeout: self.provider_timeout,
            storage_timeout: self.storage_timeout,
        }
    }
}
