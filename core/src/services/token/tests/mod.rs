//! Token lifecycle tests against in-memory repositories and a fixed clock

mod issuer_tests;
mod validator_tests;

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Utc;

use super::*;
use crate::clock::{Clock, FixedClock};
use crate::domain::entities::user::{Role, User};
use crate::repositories::{MockTokenRepository, MockUserRepository, TokenRepository, UserRepository};
use crate::services::keys::KeyMaterial;
use crate::test_fixtures::SIGNING_KEY_PEM;

pub(super) const T0: i64 = 1_700_000_000;
pub(super) const ACCESS_TTL: i64 = 900;
pub(super) const REFRESH_TTL: i64 = 7 * 24 * 3600;

pub(super) fn test_config() -> TokenServiceConfig {
    TokenServiceConfig {
        issuer: "auth-service".to_string(),
        access_token_ttl: ACCESS_TTL,
        refresh_token_ttl: REFRESH_TTL,
        hash_cost: 4,
        storage_timeout: StdDuration::from_secs(5),
    }
}

pub(super) struct Harness {
    pub clock: Arc<FixedClock>,
    pub keys: Arc<KeyMaterial>,
    pub tokens: Arc<MockTokenRepository>,
    pub users: Arc<MockUserRepository>,
    pub issuer: Arc<TokenIssuer>,
    pub rotator: TokenRotator,
    pub validator: AccessValidator,
}

impl Harness {
    pub fn new() -> Self {
        let tokens = Arc::new(MockTokenRepository::new());
        Self::with_token_repository(tokens.clone(), tokens)
    }

    /// Harness whose issuer and rotator talk to `store`
    pub fn with_token_repository(
        tokens: Arc<MockTokenRepository>,
        store: Arc<dyn TokenRepository>,
    ) -> Self {
        let clock = Arc::new(FixedClock::at_timestamp(T0));
        let keys = Arc::new(KeyMaterial::from_private_pem(SIGNING_KEY_PEM).unwrap());
        let users = Arc::new(MockUserRepository::new());
        let dyn_clock: Arc<dyn Clock> = clock.clone();

        let issuer = Arc::new(TokenIssuer::new(
            keys.clone(),
            store.clone(),
            dyn_clock.clone(),
            test_config(),
        ));
        let rotator = TokenRotator::new(issuer.clone(), store, users.clone(), dyn_clock.clone());
        let validator = AccessValidator::new(keys.clone(), dyn_clock, "auth-service");

        Self {
            clock,
            keys,
            tokens,
            users,
            issuer,
            rotator,
            validator,
        }
    }

    pub async fn active_user(&self, email: &str) -> User {
        let mut user = User::new(email, "Test User", Utc::now());
        user.external_subject_id = Some(format!("google-{}", email));
        self.users.create(&user).await.unwrap()
    }

    pub async fn admin_user(&self, email: &str) -> User {
        let mut user = self.active_user(email).await;
        user.role = Role::Admin;
        self.users.update(&user).await.unwrap()
    }
}
