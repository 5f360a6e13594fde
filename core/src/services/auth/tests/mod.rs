//! End-to-end tests of the login, refresh and logout flows

mod flow_tests;

use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::clock::FixedClock;
use crate::domain::entities::audit::ClientInfo;
use crate::domain::entities::identity::ExternalIdentity;
use crate::repositories::{
    InMemoryLoginStateStore, MockAuditSink, MockTokenRepository, MockUserRepository,
};
use crate::services::identity::MockOAuthProvider;
use crate::services::keys::KeyMaterial;
use crate::services::token::TokenServiceConfig;
use crate::test_fixtures::SIGNING_KEY_PEM;

pub(super) const APP: &str = "http://localhost:3000";

pub(super) fn identity(subject: &str, email: &str) -> ExternalIdentity {
    ExternalIdentity {
        subject_id: subject.to_string(),
        email: email.to_string(),
        email_verified: true,
        name: "Ada Lovelace".to_string(),
        avatar_url: None,
    }
}

pub(super) fn client() -> ClientInfo {
    ClientInfo::new(Some("203.0.113.7".to_string()), Some("test-agent".to_string()))
}

pub(super) struct TestContext {
    pub service: AuthService,
    pub clock: Arc<FixedClock>,
    pub users: Arc<MockUserRepository>,
    pub tokens: Arc<MockTokenRepository>,
    pub audit: Arc<MockAuditSink>,
    pub provider: MockOAuthProvider,
}

impl TestContext {
    pub fn new(admin_emails: &[&str]) -> Self {
        Self::with_audit(admin_emails, MockAuditSink::new())
    }

    pub fn with_audit(admin_emails: &[&str], audit: MockAuditSink) -> Self {
        let clock = Arc::new(FixedClock::at_timestamp(1_700_000_000));
        let users = Arc::new(MockUserRepository::new());
        let tokens = Arc::new(MockTokenRepository::new());
        let audit = Arc::new(audit);
        let provider = MockOAuthProvider::new();

        let deps = AuthDependencies {
            users: users.clone(),
            tokens: tokens.clone(),
            login_states: Arc::new(InMemoryLoginStateStore::new()),
            provider: Arc::new(provider.clone()),
            audit_sink: audit.clone(),
            keys: Arc::new(KeyMaterial::from_private_pem(SIGNING_KEY_PEM).unwrap()),
            clock: clock.clone(),
        };
        let config = AuthServiceConfig {
            token: TokenServiceConfig {
                hash_cost: 4,
                ..TokenServiceConfig::default()
            },
            admin_emails: admin_emails.iter().map(|e| e.to_string()).collect(),
            allowed_origins: vec![APP.to_string()],
            login_state_ttl: 600,
            provider_timeout: Duration::from_secs(10),
            storage_timeout: Duration::from_secs(5),
        };

        Self {
            service: AuthService::new(deps, config),
            clock,
            users,
            tokens,
            audit,
            provider,
        }
    }

    /// Run the whole provider round trip for `identity`
    pub async fn login(
        &self,
        identity: ExternalIdentity,
    ) -> crate::errors::DomainResult<LoginOutcome> {
        let code = format!("code-{}", identity.subject_id);
        self.provider.insert(code.clone(), identity);
        let challenge = self.service.begin_login(APP).await?;
        self.service
            .complete_login(&code, &challenge.state, APP, &client())
            .await
    }
}
