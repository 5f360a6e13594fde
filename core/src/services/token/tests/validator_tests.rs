use chrono::Duration;
use jsonwebtoken::{
    decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use super::*;
use crate::domain::entities::token::Claims;
use crate::errors::TokenError;
use crate::test_fixtures::FOREIGN_KEY_PEM;

#[tokio::test]
async fn test_issued_token_validates_with_expected_claims() {
    let h = Harness::new();
    let user = h.admin_user("boss@x.com").await;

    let pair = h.issuer.issue(&user).await.unwrap();
    let claims = h.validator.validate(&pair.access_token).unwrap();

    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.email, "boss@x.com");
    assert_eq!(claims.role, Role::Admin);
    assert_eq!(claims.iss, "auth-service");
    assert_eq!(claims.iat, T0);
    assert_eq!(claims.exp, claims.iat + ACCESS_TTL);
}

#[tokio::test]
async fn test_header_carries_key_id() {
    let h = Harness::new();
    let user = h.active_user("a@x.com").await;
    let (token, _) = h.issuer.sign_access_token(&user).unwrap();

    let header = decode_header(&token).unwrap();
    assert_eq!(header.alg, Algorithm::RS256);
    assert_eq!(header.kid.as_deref(), Some(h.keys.key_id()));
}

#[tokio::test]
async fn test_expiry_boundary_is_exact() {
    let h = Harness::new();
    let user = h.active_user("a@x.com").await;
    let (token, _) = h.issuer.sign_access_token(&user).unwrap();

    h.clock.advance(Duration::seconds(ACCESS_TTL - 1));
    assert!(h.validator.validate(&token).is_ok());

    h.clock.advance(Duration::seconds(1));
    assert_eq!(h.validator.validate(&token), Err(TokenError::Expired));

    h.clock.advance(Duration::seconds(1));
    assert_eq!(h.validator.validate(&token), Err(TokenError::Expired));
}

#[tokio::test]
async fn test_rejects_token_signed_with_another_key() {
    let h = Harness::new();
    let user = h.active_user("a@x.com").await;
    let claims = Claims::for_user(&user, "auth-service", h.clock.now(), ACCESS_TTL);

    let foreign = EncodingKey::from_rsa_pem(FOREIGN_KEY_PEM.as_bytes()).unwrap();
    let token = encode(&Header::new(Algorithm::RS256), &claims, &foreign).unwrap();

    assert_eq!(h.validator.validate(&token), Err(TokenError::InvalidToken));
}

#[tokio::test]
async fn test_rejects_symmetric_algorithm() {
    let h = Harness::new();
    let user = h.active_user("a@x.com").await;
    let claims = Claims::for_user(&user, "auth-service", h.clock.now(), ACCESS_TTL);

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"shared-secret"),
    )
    .unwrap();

    assert_eq!(h.validator.validate(&token), Err(TokenError::InvalidToken));
}

#[tokio::test]
async fn test_rejects_foreign_issuer() {
    let h = Harness::new();
    let user = h.active_user("a@x.com").await;
    let claims = Claims::for_user(&user, "someone-else", h.clock.now(), ACCESS_TTL);
    let token = encode(&Header::new(Algorithm::RS256), &claims, h.keys.encoding_key()).unwrap();

    assert_eq!(h.validator.validate(&token), Err(TokenError::InvalidToken));
}

#[test]
fn test_rejects_structurally_broken_tokens() {
    let h = Harness::new();
    assert_eq!(h.validator.validate(""), Err(TokenError::MalformedToken));
    assert_eq!(h.validator.validate("not-a-jwt"), Err(TokenError::MalformedToken));
    assert_eq!(h.validator.validate("a.b.c"), Err(TokenError::MalformedToken));
}

#[tokio::test]
async fn test_public_exports_verify_issued_tokens() {
    let h = Harness::new();
    let user = h.active_user("a@x.com").await;
    let pair = h.issuer.issue(&user).await.unwrap();

    let mut validation = Validation::new(Algorithm::RS256);
    // the fixed clock sits in the past relative to the wall clock
    validation.validate_exp = false;

    let from_pem = DecodingKey::from_rsa_pem(h.keys.public_key_pem().as_bytes()).unwrap();
    let decoded = decode::<Claims>(&pair.access_token, &from_pem, &validation).unwrap();
    assert_eq!(decoded.claims.sub, user.id.to_string());

    let jwk = &h.keys.jwks().keys[0];
    let from_jwk = DecodingKey::from_rsa_components(&jwk.n, &jwk.e).unwrap();
    assert!(decode::<Claims>(&pair.access_token, &from_jwk, &validation).is_ok());
}
