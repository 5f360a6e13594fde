use chrono::Duration;

use super::*;
use crate::domain::entities::token::OpaqueRefreshToken;
use crate::errors::DomainError;

#[tokio::test]
async fn test_issue_stores_only_the_hash() {
    let h = Harness::new();
    let user = h.active_user("a@x.com").await;

    let pair = h.issuer.issue(&user).await.unwrap();

    let records = h.tokens.all().await;
    assert_eq!(records.len(), 1);
    let record = &records[0];
    let opaque = OpaqueRefreshToken::parse(&pair.refresh_token).unwrap();

    assert_eq!(record.id, opaque.id);
    assert_eq!(record.user_id, user.id);
    assert!(!record.token_hash.contains(&opaque.secret));
    assert_ne!(record.token_hash, pair.refresh_token);
    assert!(record.revoked_at.is_none());
}

#[tokio::test]
async fn test_issue_applies_configured_lifetimes() {
    let h = Harness::new();
    let user = h.active_user("a@x.com").await;

    let pair = h.issuer.issue(&user).await.unwrap();

    assert_eq!(pair.expires_in, ACCESS_TTL);
    assert_eq!(pair.token_type, "Bearer");
    assert_eq!(pair.refresh_expires_at, h.clock.now() + Duration::seconds(REFRESH_TTL));
    assert_eq!(h.tokens.all().await[0].expires_at, pair.refresh_expires_at);
}

#[tokio::test]
async fn test_each_issue_yields_distinct_tokens() {
    let h = Harness::new();
    let user = h.active_user("a@x.com").await;

    let first = h.issuer.issue(&user).await.unwrap();
    let second = h.issuer.issue(&user).await.unwrap();

    assert_ne!(first.refresh_token, second.refresh_token);
    assert_ne!(first.access_token, second.access_token);
    assert_eq!(h.tokens.all().await.len(), 2);
}

#[tokio::test]
async fn test_issue_returns_nothing_when_storage_fails() {
    let h = Harness::new();
    let user = h.active_user("a@x.com").await;
    h.tokens.set_fail_writes(true);

    let result = h.issuer.issue(&user).await;

    assert!(matches!(result, Err(DomainError::Persistence { .. })));
    assert!(h.tokens.all().await.is_empty());
}
