//! Google OAuth 2.0 client
//!
//! Authorization code flow against Google's endpoints: build the consent
//! URL, exchange the code at the token endpoint and read the v2 userinfo
//! profile.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use idp_core::domain::entities::identity::{ExternalIdentity, ProviderGrant};
use idp_core::errors::AuthError;
use idp_core::services::OAuthProvider;
use idp_shared::config::GoogleOAuthConfig;

use crate::InfrastructureError;

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Userinfo v2 profile
#[derive(Debug, Deserialize)]
struct GoogleProfile {
    id: String,
    email: String,
    #[serde(default)]
    verified_email: bool,
    #[serde(default)]
    name: String,
    #[serde(default)]
    picture: Option<String>,
}

impl From<GoogleProfile> for ExternalIdentity {
    fn from(profile: GoogleProfile) -> Self {
        Self {
            subject_id: profile.id,
            email: profile.email,
            email_verified: profile.verified_email,
            name: profile.name,
            avatar_url: profile.picture.filter(|p| !p.is_empty()),
        }
    }
}

/// Google implementation of `OAuthProvider`
pub struct GoogleOAuthProvider {
    http: Client,
    config: GoogleOAuthConfig,
    auth_url: Url,
}

impl GoogleOAuthProvider {
    /// Build a client whose requests give up after `timeout`
    pub fn new(config: GoogleOAuthConfig, timeout: Duration) -> Result<Self, InfrastructureError> {
        let auth_url = Url::parse(&config.auth_url).map_err(|e| {
            InfrastructureError::Config(format!("Invalid Google auth URL: {}", e))
        })?;
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            config,
            auth_url,
        })
    }
}

#[async_trait]
impl OAuthProvider for GoogleOAuthProvider {
    fn authorization_url(&self, state: &str) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.config.scopes.join(" "))
            .append_pair("access_type", "offline")
            .append_pair("state", state);
        url.into()
    }

    async fn exchange_code(&self, code: &str) -> Result<ProviderGrant, AuthError> {
        let params = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_url.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "token endpoint request failed");
                AuthError::ExchangeFailed {
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "token endpoint rejected the code");
            return Err(AuthError::ExchangeFailed {
                message: format!("token endpoint returned {}", status),
            });
        }

        let token: TokenResponse = response.json().await.map_err(|e| AuthError::ExchangeFailed {
            message: format!("invalid token response: {}", e),
        })?;

        debug!("authorization code exchanged");
        Ok(ProviderGrant {
            access_token: token.access_token,
            token_type: token.token_type,
        })
    }

    async fn fetch_profile(&self, grant: &ProviderGrant) -> Result<ExternalIdentity, AuthError> {
        let response = self
            .http
            .get(&self.config.userinfo_url)
            .bearer_auth(&grant.access_token)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "userinfo request failed");
                AuthError::ProfileFetchFailed {
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "userinfo endpoint refused the grant");
            return Err(AuthError::ProfileFetchFailed {
                message: format!("userinfo endpoint returned {}", status),
            });
        }

        let profile: GoogleProfile =
            response.json().await.map_err(|e| AuthError::ProfileFetchFailed {
                message: format!("invalid userinfo response: {}", e),
            })?;

        Ok(profile.into())
    }
}
