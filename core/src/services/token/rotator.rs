//! Refresh token redemption: rotate on use, revoke on logout

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::issuer::TokenIssuer;
use crate::clock::Clock;
use crate::domain::entities::token::{OpaqueRefreshToken, RefreshToken, TokenPair};
use crate::errors::{DomainResult, TokenError};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::timeout::storage_call;

/// Redeems refresh tokens
///
/// Each refresh token can be redeemed once. Presenting it again fails with
/// `InvalidRefreshToken` because its `revoked_at` is already set.
pub struct TokenRotator {
    issuer: Arc<TokenIssuer>,
    tokens: Arc<dyn TokenRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

/// Result of a successful rotation
#[derive(Debug)]
pub struct Rotation {
    pub user_id: Uuid,
    pub tokens: TokenPair,
}

impl TokenRotator {
    pub fn new(
        issuer: Arc<TokenIssuer>,
        tokens: Arc<dyn TokenRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            issuer,
            tokens,
            users,
            clock,
        }
    }

    /// Redeem `raw` and issue a successor pair
    ///
    /// # Errors
    ///
    /// * `InvalidRefreshToken` - Unknown, revoked, expired, already rotated,
    ///   lost a concurrent rotation, or the owner can no longer authenticate
    /// * `Persistence` - Storage failed; the presented token is left as it was
    pub async fn rotate(&self, raw: &str) -> DomainResult<Rotation> {
        let current = self
            .find_redeemable(raw)
            .await?
            .ok_or(TokenError::InvalidRefreshToken)?;

        let storage_timeout = self.issuer.config().storage_timeout;
        let user = storage_call(
            storage_timeout,
            "load refresh token owner",
            self.users.find_by_id(current.user_id),
        )
        .await?
        .filter(|u| u.can_authenticate())
        .ok_or_else(|| {
            debug!(user_id = %current.user_id, "refresh token owner missing or inactive");
            TokenError::InvalidRefreshToken
        })?;

        let (access_token, _) = self.issuer.sign_access_token(&user)?;
        let (raw_refresh, successor) = self.issuer.mint_refresh_token(user.id).await?;

        let rotated = storage_call(
            storage_timeout,
            "rotate refresh token",
            self.tokens.rotate(current.id, &successor, self.clock.now()),
        )
        .await?;

        if !rotated {
            warn!(
                token_id = %current.id,
                user_id = %user.id,
                "refresh token lost a concurrent rotation"
            );
            return Err(TokenError::InvalidRefreshToken.into());
        }

        info!(
            user_id = %user.id,
            token_id = %current.id,
            successor_id = %successor.id,
            "rotated refresh token"
        );
        Ok(Rotation {
            user_id: user.id,
            tokens: TokenPair::new(
                access_token,
                raw_refresh,
                self.issuer.config().access_token_ttl,
                successor.expires_at,
            ),
        })
    }

    /// Revoke `raw` without issuing a successor
    ///
    /// Returns the owner when this call revoked a live token, `None` when
    /// nothing matched. No match is not an error.
    pub async fn revoke(&self, raw: &str) -> DomainResult<Option<Uuid>> {
        let Some(current) = self.find_redeemable(raw).await? else {
            return Ok(None);
        };

        let revoked = storage_call(
            self.issuer.config().storage_timeout,
            "revoke refresh token",
            self.tokens.revoke(current.id, self.clock.now()),
        )
        .await?;

        if revoked {
            info!(user_id = %current.user_id, token_id = %current.id, "revoked refresh token");
            Ok(Some(current.user_id))
        } else {
            Ok(None)
        }
    }

    /// Look up the record named by `raw` and confirm the secret against its hash
    async fn find_redeemable(&self, raw: &str) -> DomainResult<Option<RefreshToken>> {
        let Some(presented) = OpaqueRefreshToken::parse(raw) else {
            debug!("presented refresh token is malformed");
            return Ok(None);
        };

        let record = storage_call(
            self.issuer.config().storage_timeout,
            "find refresh token",
            self.tokens.find_by_id(presented.id),
        )
        .await?;

        let Some(record) = record else {
            debug!(token_id = %presented.id, "refresh token not found");
            return Ok(None);
        };

        let matches = self
            .issuer
            .hasher()
            .verify(presented.secret, record.token_hash.clone())
            .await?;
        if !matches {
            warn!(token_id = %record.id, "refresh token secret mismatch");
            return Ok(None);
        }

        if record.is_revoked() {
            warn!(
                token_id = %record.id,
                user_id = %record.user_id,
                "revoked refresh token presented again"
            );
            return Ok(None);
        }
        if record.is_expired(self.clock.now()) {
            debug!(token_id = %record.id, "refresh token expired");
            return Ok(None);
        }

        Ok(Some(record))
    }
}
