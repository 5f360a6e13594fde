use super::*;
use crate::domain::entities::audit::AuditAction;
use crate::errors::{DomainError, TokenError};

fn is_invalid_refresh<T>(result: &Result<T, DomainError>) -> bool {
    matches!(result, Err(DomainError::Token(TokenError::InvalidRefreshToken)))
}

#[tokio::test]
async fn test_login_refresh_then_replay_original_fails() {
    let ctx = TestContext::new(&[]);
    let login = ctx.login(identity("s1", "a@x.com")).await.unwrap();
    let original = login.tokens.refresh_token.clone();

    let refreshed = ctx.service.refresh(&original, &client()).await.unwrap();
    assert_ne!(refreshed.refresh_token, original);
    let claims = ctx.service.validate(&refreshed.access_token).unwrap();
    assert_eq!(claims.sub, login.user.id.to_string());

    let replay = ctx.service.refresh(&original, &client()).await;
    assert!(is_invalid_refresh(&replay));
}

#[tokio::test]
async fn test_logout_revokes_and_is_lenient() {
    let ctx = TestContext::new(&[]);
    let login = ctx.login(identity("s1", "a@x.com")).await.unwrap();
    let token = login.tokens.refresh_token;

    ctx.service.logout(&token, &client()).await.unwrap();
    ctx.service.logout(&token, &client()).await.unwrap();
    ctx.service.logout("not-a-token", &client()).await.unwrap();

    assert!(is_invalid_refresh(&ctx.service.refresh(&token, &client()).await));
}

#[tokio::test]
async fn test_lifecycle_audit_trail() {
    let ctx = TestContext::new(&[]);
    let login = ctx.login(identity("s1", "a@x.com")).await.unwrap();

    let refreshed = ctx
        .service
        .refresh(&login.tokens.refresh_token, &client())
        .await
        .unwrap();
    // failed refresh and unmatched logout leave no trace
    let _ = ctx.service.refresh(&login.tokens.refresh_token, &client()).await;
    ctx.service.logout("unknown", &client()).await.unwrap();
    ctx.service
        .logout(&refreshed.refresh_token, &client())
        .await
        .unwrap();

    assert_eq!(
        ctx.audit.actions().await,
        vec![AuditAction::Login, AuditAction::TokenRefresh, AuditAction::Logout]
    );
    let events = ctx.audit.events().await;
    assert!(events.iter().all(|e| e.user_id == Some(login.user.id)));
}

#[tokio::test]
async fn test_validate_maps_token_errors() {
    let ctx = TestContext::new(&[]);

    let result = ctx.service.validate("garbage");

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::MalformedToken))
    ));
}
