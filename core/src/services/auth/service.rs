//! Authentication service implementation

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::config::AuthServiceConfig;
use crate::clock::Clock;
use crate::domain::entities::audit::{AuditAction, ClientInfo};
use crate::domain::entities::identity::LoginChallenge;
use crate::domain::entities::token::{Claims, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::DomainResult;
use crate::repositories::{AuditSink, LoginStateStore, TokenRepository, UserRepository};
use crate::services::audit::AuditRecorder;
use crate::services::directory::{AdminAllowList, UserDirectory};
use crate::services::identity::{IdentityExchanger, OAuthProvider};
use crate::services::keys::{JwkSet, KeyMaterial};
use crate::services::token::{AccessValidator, TokenIssuer, TokenRotator};

/// Collaborators required by `AuthService`
#[derive(Clone)]
pub struct AuthDependencies {
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenRepository>,
    pub login_states: Arc<dyn LoginStateStore>,
    pub provider: Arc<dyn OAuthProvider>,
    pub audit_sink: Arc<dyn AuditSink>,
    /// Signing key pair, loaded once at startup
    pub keys: Arc<KeyMaterial>,
    pub clock: Arc<dyn Clock>,
}

/// Result of a completed login
#[derive(Debug)]
pub struct LoginOutcome {
    pub tokens: TokenPair,
    pub user: User,
    /// Where the browser should be sent back to
    pub redirect_target: String,
}

/// Authentication service for the complete token lifecycle
pub struct AuthService {
    exchanger: IdentityExchanger,
    directory: UserDirectory,
    issuer: Arc<TokenIssuer>,
    rotator: TokenRotator,
    validator: Arc<AccessValidator>,
    audit: AuditRecorder,
    keys: Arc<KeyMaterial>,
}

impl AuthService {
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `deps` - Storage, provider, audit and key collaborators
    /// * `config` - Service configuration
    pub fn new(deps: AuthDependencies, config: AuthServiceConfig) -> Self {
        let issuer = Arc::new(TokenIssuer::new(
            deps.keys.clone(),
            deps.tokens.clone(),
            deps.clock.clone(),
            config.token.clone(),
        ));
        let rotator = TokenRotator::new(
            issuer.clone(),
            deps.tokens,
            deps.users.clone(),
            deps.clock.clone(),
        );
        let validator = Arc::new(AccessValidator::new(
            deps.keys.clone(),
            deps.clock.clone(),
            &config.token.issuer,
        ));
        let directory = UserDirectory::new(
            deps.users,
            AdminAllowList::new(&config.admin_emails),
            deps.clock.clone(),
            config.storage_timeout,
        );
        let exchanger = IdentityExchanger::new(
            deps.provider,
            deps.login_states,
            deps.clock.clone(),
            config.exchanger(),
        );
        let audit = AuditRecorder::new(deps.audit_sink, deps.clock, config.storage_timeout);

        Self {
            exchanger,
            directory,
            issuer,
            rotator,
            validator,
            audit,
            keys: deps.keys,
        }
    }

    /// Start a provider login that returns to `redirect_target`
    pub async fn begin_login(&self, redirect_target: &str) -> DomainResult<LoginChallenge> {
        self.exchanger.begin(redirect_target).await
    }

    /// Finish a provider login and issue the first token pair
    ///
    /// This method:
    /// 1. Consumes the CSRF state and exchanges the code with the provider
    /// 2. Reconciles the identity with the user directory
    /// 3. Issues an access token and a refresh token
    /// 4. Records a `LOGIN` audit event
    ///
    /// # Errors
    ///
    /// * `InvalidState` - State unknown, reused, expired or bound elsewhere
    /// * `ExchangeFailed` / `ProfileFetchFailed` - Provider failure
    /// * `UserInactive` / `EmailConflict` - The identity may not log in
    /// * `Persistence` - Storage failure; no tokens were issued
    pub async fn complete_login(
        &self,
        code: &str,
        state: &str,
        redirect_target: &str,
        client: &ClientInfo,
    ) -> DomainResult<LoginOutcome> {
        let identity = self.exchanger.complete(code, state, redirect_target).await?;
        let user = self.directory.reconcile(&identity).await?;
        let tokens = self.issuer.issue(&user).await?;

        info!(user_id = %user.id, role = %user.role, "user logged in");
        self.audit.record(AuditAction::Login, Some(user.id), client).await;

        Ok(LoginOutcome {
            tokens,
            user,
            redirect_target: redirect_target.to_string(),
        })
    }

    /// Exchange a refresh token for a new pair
    ///
    /// # Errors
    ///
    /// * `InvalidRefreshToken` - The caller must log in again
    /// * `Persistence` - Storage failure; the presented token is still valid
    pub async fn refresh(
        &self,
        refresh_token: &str,
        client: &ClientInfo,
    ) -> DomainResult<TokenPair> {
        let rotation = self.rotator.rotate(refresh_token).await?;
        self.audit
            .record(AuditAction::TokenRefresh, Some(rotation.user_id), client)
            .await;
        Ok(rotation.tokens)
    }

    /// Revoke a refresh token
    ///
    /// Unknown, expired or already revoked tokens are accepted silently.
    pub async fn logout(&self, refresh_token: &str, client: &ClientInfo) -> DomainResult<()> {
        if let Some(user_id) = self.rotator.revoke(refresh_token).await? {
            info!(user_id = %user_id, "user logged out");
            self.audit.record(AuditAction::Logout, Some(user_id), client).await;
        }
        Ok(())
    }

    /// Validate an access token
    pub fn validate(&self, access_token: &str) -> DomainResult<Claims> {
        Ok(self.validator.validate(access_token)?)
    }

    /// The user behind a validated access token
    pub async fn current_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.directory.get(user_id).await
    }

    /// SPKI PEM of the signing key
    pub fn public_signing_key(&self) -> &str {
        self.keys.public_key_pem()
    }

    pub fn jwks(&self) -> JwkSet {
        self.keys.jwks()
    }

    /// Shared validator for request middleware
    pub fn validator(&self) -> Arc<AccessValidator> {
        self.validator.clone()
    }
}
