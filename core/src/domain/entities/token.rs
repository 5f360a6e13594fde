//! Token entities: access token claims, refresh token records and the pair
//! handed back to clients.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{Role, User};

/// JWT claims carried by every access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Issuer
    pub iss: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// JWT ID
    pub jti: String,
}

impl Claims {
    /// Build access token claims for a user
    pub fn for_user(user: &User, issuer: &str, issued_at: DateTime<Utc>, ttl_secs: i64) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            iss: issuer.to_string(),
            iat,
            exp: iat + ttl_secs,
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Parse the subject as a user id
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// An access token is expired from its `exp` second onwards
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Stored refresh token record
///
/// Only the bcrypt hash of the secret half of the raw token is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Row id, also the public lookup half of the raw token
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Creates a new refresh token record
    pub fn new(
        id: Uuid,
        user_id: Uuid,
        token_hash: String,
        created_at: DateTime<Utc>,
        ttl_secs: i64,
    ) -> Self {
        Self {
            id,
            user_id,
            token_hash,
            expires_at: created_at + Duration::seconds(ttl_secs),
            created_at,
            revoked_at: None,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Valid iff not revoked and not yet expired
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && !self.is_expired(now)
    }

    pub fn revoke(&mut self, now: DateTime<Utc>) {
        if self.revoked_at.is_none() {
            self.revoked_at = Some(now);
        }
    }
}

/// Raw refresh token as handed to a client: `<id>.<secret>`
#[derive(Clone, PartialEq, Eq)]
pub struct OpaqueRefreshToken {
    pub id: Uuid,
    pub secret: String,
}

impl OpaqueRefreshToken {
    const MIN_SECRET_LEN: usize = 32;
    const MAX_SECRET_LEN: usize = 72;

    pub fn new(id: Uuid, secret: String) -> Self {
        Self { id, secret }
    }

    /// Split a presented raw value; `None` when it cannot be one of ours
    pub fn parse(raw: &str) -> Option<Self> {
        let (id, secret) = raw.trim().split_once('.')?;
        let id = Uuid::parse_str(id).ok()?;
        if secret.len() < Self::MIN_SECRET_LEN
            || secret.len() > Self::MAX_SECRET_LEN
            || secret.contains('.')
        {
            return None;
        }
        Some(Self::new(id, secret.to_string()))
    }

    /// Raw string form returned to the client
    pub fn compose(&self) -> String {
        format!("{}.{}", self.id.simple(), self.secret)
    }
}

impl fmt::Debug for OpaqueRefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueRefreshToken")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Access and refresh token returned after login or rotation
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    /// Refresh token expiry, used for cookie lifetimes
    pub refresh_expires_at: DateTime<Utc>,
}

impl TokenPair {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        refresh_expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            refresh_expires_at,
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("refresh_expires_at", &self.refresh_expires_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_token_lifecycle() {
        let now = Utc::now();
        let mut token = RefreshToken::new(Uuid::new_v4(), Uuid::new_v4(), "hash".into(), now, 60);

        assert!(token.is_active(now));
        assert!(token.is_active(now + Duration::seconds(59)));
        assert!(!token.is_active(now + Duration::seconds(60)));

        token.revoke(now);
        assert!(token.is_revoked());
        assert!(!token.is_active(now));
    }

    #[test]
    fn test_revoke_keeps_first_timestamp() {
        let now = Utc::now();
        let mut token = RefreshToken::new(Uuid::new_v4(), Uuid::new_v4(), "hash".into(), now, 60);
        token.revoke(now);
        token.revoke(now + Duration::seconds(5));
        assert_eq!(token.revoked_at, Some(now));
    }

    #[test]
    fn test_opaque_token_parse_and_compose() {
        let id = Uuid::new_v4();
        let secret = "A".repeat(43);
        let raw = OpaqueRefreshToken::new(id, secret.clone()).compose();

        let parsed = OpaqueRefreshToken::parse(&raw).unwrap();
        assert_eq!(parsed.id, id);
        assert_eq!(parsed.secret, secret);
    }

    #[test]
    fn test_opaque_token_rejects_foreign_values() {
        assert!(OpaqueRefreshToken::parse("").is_none());
        assert!(OpaqueRefreshToken::parse("not-a-token").is_none());
        assert!(OpaqueRefreshToken::parse(&format!("{}.short", Uuid::new_v4())).is_none());
        assert!(OpaqueRefreshToken::parse(&format!("nope.{}", "A".repeat(43))).is_none());
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let token = OpaqueRefreshToken::new(Uuid::new_v4(), "super-secret-value".into());
        assert!(!format!("{:?}", token).contains("super-secret-value"));

        let pair = TokenPair::new("jwt".into(), "raw-refresh".into(), 900, Utc::now());
        assert!(!format!("{:?}", pair).contains("raw-refresh"));
    }

    #[test]
    fn test_claims_expiry_boundary() {
        let now = Utc::now();
        let user = User::new("a@x.com", "Alice", now);
        let claims = Claims::for_user(&user, "auth-service", now, 900);

        assert_eq!(claims.exp, claims.iat + 900);
        assert!(!claims.is_expired_at(now + Duration::seconds(899)));
        assert!(claims.is_expired_at(now + Duration::seconds(900)));
        assert_eq!(claims.user_id().unwrap(), user.id);
    }
}
