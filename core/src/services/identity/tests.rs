use chrono::Duration as ChronoDuration;
use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::clock::FixedClock;
use crate::domain::entities::identity::ExternalIdentity;
use crate::errors::{AuthError, DomainError};
use crate::repositories::InMemoryLoginStateStore;

const APP: &str = "http://localhost:3000";

fn identity() -> ExternalIdentity {
    ExternalIdentity {
        subject_id: "google-123".to_string(),
        email: "a@x.com".to_string(),
        email_verified: true,
        name: "Ada".to_string(),
        avatar_url: None,
    }
}

struct Fixture {
    clock: Arc<FixedClock>,
    states: Arc<InMemoryLoginStateStore>,
    provider: MockOAuthProvider,
    exchanger: IdentityExchanger,
}

fn fixture(provider: MockOAuthProvider) -> Fixture {
    let clock = Arc::new(FixedClock::at_timestamp(1_700_000_000));
    let states = Arc::new(InMemoryLoginStateStore::new());
    let exchanger = IdentityExchanger::new(
        Arc::new(provider.clone()),
        states.clone(),
        clock.clone(),
        IdentityExchangerConfig {
            allowed_origins: vec![APP.to_string()],
            state_ttl: 600,
            provider_timeout: Duration::from_secs(10),
            storage_timeout: Duration::from_secs(5),
        },
    );
    Fixture {
        clock,
        states,
        provider,
        exchanger,
    }
}

fn is_auth_error(result: &Result<ExternalIdentity, DomainError>, expected: AuthError) -> bool {
    matches!(result, Err(DomainError::Auth(err)) if *err == expected)
}

#[tokio::test]
async fn test_begin_binds_state_to_redirect() {
    let f = fixture(MockOAuthProvider::new());

    let challenge = f.exchanger.begin("http://localhost:3000/home").await.unwrap();

    // 16 random bytes, base64url without padding
    assert_eq!(challenge.state.len(), 22);
    assert!(challenge.authorization_url.contains(&challenge.state));
    assert_eq!(f.states.len().await, 1);

    let other = f.exchanger.begin(APP).await.unwrap();
    assert_ne!(challenge.state, other.state);
}

#[tokio::test]
async fn test_begin_rejects_foreign_redirect() {
    let f = fixture(MockOAuthProvider::new());

    let result = f.exchanger.begin("https://evil.example.com").await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidRedirectTarget { .. }))
    ));
    assert!(f.states.is_empty().await);
}

#[tokio::test]
async fn test_complete_returns_identity_once() {
    let f = fixture(MockOAuthProvider::new().with_identity("code-1", identity()));
    let challenge = f.exchanger.begin(APP).await.unwrap();

    let fetched = f.exchanger.complete("code-1", &challenge.state, APP).await.unwrap();
    assert_eq!(fetched, identity());

    let replay = f.exchanger.complete("code-1", &challenge.state, APP).await;
    assert!(is_auth_error(&replay, AuthError::InvalidState));
    assert_eq!(f.provider.exchange_count(), 1);
}

#[tokio::test]
async fn test_complete_rejects_tampered_state_before_exchange() {
    let f = fixture(MockOAuthProvider::new().with_identity("code-1", identity()));
    f.exchanger.begin(APP).await.unwrap();

    let result = f.exchanger.complete("code-1", "forged-state", APP).await;

    assert!(is_auth_error(&result, AuthError::InvalidState));
    assert_eq!(f.provider.exchange_count(), 0);
}

#[tokio::test]
async fn test_complete_rejects_redirect_mismatch() {
    let f = fixture(MockOAuthProvider::new().with_identity("code-1", identity()));
    let challenge = f.exchanger.begin(APP).await.unwrap();

    let result = f
        .exchanger
        .complete("code-1", &challenge.state, "http://localhost:3000/other")
        .await;

    assert!(is_auth_error(&result, AuthError::InvalidState));
}

#[tokio::test]
async fn test_complete_rejects_expired_state() {
    let f = fixture(MockOAuthProvider::new().with_identity("code-1", identity()));
    let challenge = f.exchanger.begin(APP).await.unwrap();

    f.clock.advance(ChronoDuration::seconds(600));
    let result = f.exchanger.complete("code-1", &challenge.state, APP).await;

    assert!(is_auth_error(&result, AuthError::InvalidState));
}

#[tokio::test]
async fn test_provider_failures_map_to_their_step() {
    let f = fixture(MockOAuthProvider::new().with_identity("code-1", identity()));
    let challenge = f.exchanger.begin(APP).await.unwrap();
    let result = f.exchanger.complete("unknown", &challenge.state, APP).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::ExchangeFailed { .. }))
    ));

    let f = fixture(
        MockOAuthProvider::new()
            .with_identity("code-1", identity())
            .failing_profile(),
    );
    let challenge = f.exchanger.begin(APP).await.unwrap();
    let result = f.exchanger.complete("code-1", &challenge.state, APP).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::ProfileFetchFailed { .. }))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_slow_provider_times_out_as_exchange_failure() {
    let f = fixture(
        MockOAuthProvider::new()
            .with_identity("code-1", identity())
            .with_delay(Duration::from_secs(30)),
    );
    let challenge = f.exchanger.begin(APP).await.unwrap();

    let result = f.exchanger.complete("code-1", &challenge.state, APP).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::ExchangeFailed { .. }))
    ));
}
