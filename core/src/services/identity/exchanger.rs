//! CSRF-bound authorization code exchange

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Duration as ChronoDuration;
use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use idp_shared::redirect::is_allowed_redirect;

use super::provider::OAuthProvider;
use crate::clock::Clock;
use crate::domain::entities::identity::{ExternalIdentity, LoginChallenge, PendingLogin};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::LoginStateStore;
use crate::services::timeout::storage_call;

const STATE_BYTES: usize = 16;

/// Settings for `IdentityExchanger`
#[derive(Debug, Clone)]
pub struct IdentityExchangerConfig {
    /// Origins a post-login redirect may point at
    pub allowed_origins: Vec<String>,
    /// Lifetime of a pending login in seconds
    pub state_ttl: i64,
    pub provider_timeout: Duration,
    pub storage_timeout: Duration,
}

impl Default for IdentityExchangerConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
            state_ttl: 600,
            provider_timeout: Duration::from_secs(10),
            storage_timeout: Duration::from_secs(5),
        }
    }
}

/// Runs the provider side of a login
pub struct IdentityExchanger {
    provider: Arc<dyn OAuthProvider>,
    states: Arc<dyn LoginStateStore>,
    clock: Arc<dyn Clock>,
    config: IdentityExchangerConfig,
}

impl IdentityExchanger {
    pub fn new(
        provider: Arc<dyn OAuthProvider>,
        states: Arc<dyn LoginStateStore>,
        clock: Arc<dyn Clock>,
        config: IdentityExchangerConfig,
    ) -> Self {
        Self {
            provider,
            states,
            clock,
            config,
        }
    }

    /// Start a login that will come back to `redirect_target`
    ///
    /// # Errors
    /// * `AuthError::InvalidRedirectTarget` if the target is not under an allowed origin
    /// * `DomainError::Persistence` if the state could not be stored
    pub async fn begin(&self, redirect_target: &str) -> DomainResult<LoginChallenge> {
        if !is_allowed_redirect(redirect_target, &self.config.allowed_origins) {
            warn!(redirect = redirect_target, "rejected redirect target");
            return Err(AuthError::InvalidRedirectTarget {
                target: redirect_target.to_string(),
            }
            .into());
        }

        let state = generate_state();
        let now = self.clock.now();
        let pending = PendingLogin {
            redirect_target: redirect_target.to_string(),
            created_at: now,
            expires_at: now + ChronoDuration::seconds(self.config.state_ttl),
        };

        storage_call(
            self.config.storage_timeout,
            "store login state",
            self.states.put(&state, &pending),
        )
        .await?;

        Ok(LoginChallenge {
            authorization_url: self.provider.authorization_url(&state),
            state,
        })
    }

    /// Consume `state` and exchange `code` for the caller's identity
    ///
    /// The state is consumed before the provider is contacted, so a replayed
    /// callback fails even when the first attempt did not finish.
    ///
    /// # Errors
    /// * `AuthError::InvalidState` for an unknown, used, expired or mismatched state
    /// * `AuthError::ExchangeFailed` / `AuthError::ProfileFetchFailed` on provider
    ///   failure or timeout
    pub async fn complete(
        &self,
        code: &str,
        state: &str,
        redirect_target: &str,
    ) -> DomainResult<ExternalIdentity> {
        let pending = storage_call(
            self.config.storage_timeout,
            "consume login state",
            self.states.take(state),
        )
        .await?
        .ok_or(AuthError::InvalidState)?;

        if pending.is_expired(self.clock.now()) {
            debug!("login state expired");
            return Err(AuthError::InvalidState.into());
        }
        if pending.redirect_target != redirect_target {
            warn!("login state bound to a different redirect target");
            return Err(AuthError::InvalidState.into());
        }

        let limit = self.config.provider_timeout;
        let grant = tokio::time::timeout(limit, self.provider.exchange_code(code))
            .await
            .map_err(|_| AuthError::ExchangeFailed {
                message: format!("timed out after {}ms", limit.as_millis()),
            })??;

        let identity = tokio::time::timeout(limit, self.provider.fetch_profile(&grant))
            .await
            .map_err(|_| AuthError::ProfileFetchFailed {
                message: format!("timed out after {}ms", limit.as_millis()),
            })??;

        debug!(subject = %identity.subject_id, "provider identity fetched");
        Ok(identity)
    }
}

fn generate_state() -> String {
    let mut bytes = [0u8; STATE_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
