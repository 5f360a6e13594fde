//! Access and refresh token issuance

use std::sync::Arc;

use jsonwebtoken::{encode, Algorithm, Header};
use tracing::debug;
use uuid::Uuid;

use super::config::TokenServiceConfig;
use super::hasher::RefreshTokenHasher;
use crate::clock::Clock;
use crate::domain::entities::token::{Claims, OpaqueRefreshToken, RefreshToken, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{DomainResult, TokenError};
use crate::repositories::TokenRepository;
use crate::services::keys::KeyMaterial;
use crate::services::timeout::storage_call;

/// Mints RS256 access tokens and opaque refresh tokens
pub struct TokenIssuer {
    keys: Arc<KeyMaterial>,
    tokens: Arc<dyn TokenRepository>,
    clock: Arc<dyn Clock>,
    hasher: RefreshTokenHasher,
    config: TokenServiceConfig,
}

impl TokenIssuer {
    pub fn new(
        keys: Arc<KeyMaterial>,
        tokens: Arc<dyn TokenRepository>,
        clock: Arc<dyn Clock>,
        config: TokenServiceConfig,
    ) -> Self {
        Self {
            keys,
            tokens,
            clock,
            hasher: RefreshTokenHasher::new(config.hash_cost),
            config,
        }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    pub(crate) fn hasher(&self) -> &RefreshTokenHasher {
        &self.hasher
    }

    /// Issue a fresh pair and store the refresh token record
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Both tokens; the raw refresh token is not kept anywhere
    /// * `Err(DomainError::Persistence)` - Storage failed; no token is returned
    pub async fn issue(&self, user: &User) -> DomainResult<TokenPair> {
        let (access_token, _) = self.sign_access_token(user)?;
        let (raw_refresh, record) = self.mint_refresh_token(user.id).await?;

        storage_call(
            self.config.storage_timeout,
            "insert refresh token",
            self.tokens.create(&record),
        )
        .await?;

        debug!(user_id = %user.id, token_id = %record.id, "issued token pair");
        Ok(TokenPair::new(
            access_token,
            raw_refresh,
            self.config.access_token_ttl,
            record.expires_at,
        ))
    }

    /// Sign an access token for `user`
    pub fn sign_access_token(&self, user: &User) -> DomainResult<(String, Claims)> {
        let claims = Claims::for_user(
            user,
            &self.config.issuer,
            self.clock.now(),
            self.config.access_token_ttl,
        );

        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.keys.key_id().to_string());

        let token = encode(&header, &claims, self.keys.encoding_key()).map_err(|e| {
            TokenError::SigningFailed {
                message: e.to_string(),
            }
        })?;
        Ok((token, claims))
    }

    /// Build a refresh token without storing it
    ///
    /// Returns the raw value for the client and the record to persist.
    pub(crate) async fn mint_refresh_token(
        &self,
        user_id: Uuid,
    ) -> DomainResult<(String, RefreshToken)> {
        let opaque = OpaqueRefreshToken::new(Uuid::new_v4(), RefreshTokenHasher::generate_secret());
        let token_hash = self.hasher.hash(opaque.secret.clone()).await?;

        let record = RefreshToken::new(
            opaque.id,
            user_id,
            token_hash,
            self.clock.now(),
            self.config.refresh_token_ttl,
        );
        Ok((opaque.compose(), record))
    }
}
