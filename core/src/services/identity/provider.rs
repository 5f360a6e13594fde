//! OAuth provider port

use async_trait::async_trait;

use crate::domain::entities::identity::{ExternalIdentity, ProviderGrant};
use crate::errors::AuthError;

/// Client for an external OAuth 2.0 authorization server
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Authorization endpoint URL carrying `state`
    fn authorization_url(&self, state: &str) -> String;

    /// Exchange an authorization code for an access grant
    ///
    /// # Errors
    /// * `AuthError::ExchangeFailed` on network or provider failure
    async fn exchange_code(&self, code: &str) -> Result<ProviderGrant, AuthError>;

    /// Fetch the profile belonging to `grant`
    ///
    /// # Errors
    /// * `AuthError::ProfileFetchFailed` on network or provider failure
    async fn fetch_profile(&self, grant: &ProviderGrant) -> Result<ExternalIdentity, AuthError>;
}
