//! Scriptable OAuth provider for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use super::provider::OAuthProvider;
use crate::domain::entities::identity::{ExternalIdentity, ProviderGrant};
use crate::errors::AuthError;

/// OAuth provider that maps authorization codes to fixed identities
///
/// Unknown codes fail the exchange. A configured delay is applied before
/// every network-shaped call.
#[derive(Clone, Default)]
pub struct MockOAuthProvider {
    identities: Arc<RwLock<HashMap<String, ExternalIdentity>>>,
    delay: Option<Duration>,
    fail_profile: bool,
    exchanges: Arc<AtomicUsize>,
}

impl MockOAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `code` exchange into `identity`
    pub fn with_identity(self, code: impl Into<String>, identity: ExternalIdentity) -> Self {
        self.insert(code, identity);
        self
    }

    pub fn insert(&self, code: impl Into<String>, identity: ExternalIdentity) {
        if let Ok(mut identities) = self.identities.write() {
            identities.insert(code.into(), identity);
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Exchange succeeds but every profile fetch fails
    pub fn failing_profile(mut self) -> Self {
        self.fail_profile = true;
        self
    }

    /// Number of code exchanges attempted
    pub fn exchange_count(&self) -> usize {
        self.exchanges.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl OAuthProvider for MockOAuthProvider {
    fn authorization_url(&self, state: &str) -> String {
        format!("https://provider.test/authorize?state={}", state)
    }

    async fn exchange_code(&self, code: &str) -> Result<ProviderGrant, AuthError> {
        self.exchanges.fetch_add(1, Ordering::SeqCst);
        self.pause().await;

        let known = self
            .identities
            .read()
            .map(|identities| identities.contains_key(code))
            .unwrap_or(false);
        if !known {
            return Err(AuthError::ExchangeFailed {
                message: "unknown authorization code".to_string(),
            });
        }

        Ok(ProviderGrant {
            access_token: code.to_string(),
            token_type: "Bearer".to_string(),
        })
    }

    async fn fetch_profile(&self, grant: &ProviderGrant) -> Result<ExternalIdentity, AuthError> {
        self.pause().await;
        if self.fail_profile {
            return Err(AuthError::ProfileFetchFailed {
                message: "profile endpoint unavailable".to_string(),
            });
        }

        self.identities
            .read()
            .ok()
            .and_then(|identities| identities.get(&grant.access_token).cloned())
            .ok_or_else(|| AuthError::ProfileFetchFailed {
                message: "no profile for grant".to_string(),
            })
    }
}
