//! Shared setup for the HTTP tests
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::LOCATION;
use actix_web::web;

use idp_api::{AppState, CookieSettings};
use idp_core::domain::entities::identity::ExternalIdentity;
use idp_core::repositories::{
    InMemoryLoginStateStore, MockAuditSink, MockTokenRepository, MockUserRepository,
};
use idp_core::services::{
    AuthDependencies, AuthService, AuthServiceConfig, KeyMaterial, MockOAuthProvider,
    TokenServiceConfig,
};
use idp_core::FixedClock;
use idp_shared::CorsConfig;

pub const APP: &str = "http://localhost:3000";
pub const T0: i64 = 1_700_000_000;

const SIGNING_KEY_PEM: &str = include_str!("../../../core/testdata/signing_key.pem");

pub struct TestServer {
    pub state: web::Data<AppState>,
    pub cors: CorsConfig,
    pub clock: Arc<FixedClock>,
    pub users: Arc<MockUserRepository>,
    pub tokens: Arc<MockTokenRepository>,
    pub audit: Arc<MockAuditSink>,
    pub provider: MockOAuthProvider,
}

impl TestServer {
    pub fn new() -> Self {
        let clock = Arc::new(FixedClock::at_timestamp(T0));
        let users = Arc::new(MockUserRepository::new());
        let tokens = Arc::new(MockTokenRepository::new());
        let audit = Arc::new(MockAuditSink::new());
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
            admin_emails: vec!["root@example.com".to_string()],
            allowed_origins: vec![APP.to_string()],
            login_state_ttl: 600,
            provider_timeout: Duration::from_secs(5),
            storage_timeout: Duration::from_secs(5),
        };
        let auth = Arc::new(AuthService::new(deps, config));

        Self {
            state: web::Data::new(AppState::new(auth, CookieSettings::default(), APP)),
            cors: CorsConfig {
                allowed_origins: vec![APP.to_string()],
                max_age: 300,
            },
            clock,
            users,
            tokens,
            audit,
            provider,
        }
    }
}

pub fn identity(subject: &str, email: &str) -> ExternalIdentity {
    ExternalIdentity {
        subject_id: subject.to_string(),
        email: email.to_string(),
        email_verified: true,
        name: "Ada Lovelace".to_string(),
        avatar_url: Some("https://img.test/ada.png".to_string()),
    }
}

pub fn response_cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Value of `access_token` in a front-end callback URL
pub fn access_token_from(location: &str) -> String {
    location
        .split_once("access_token=")
        .map(|(_, token)| token.to_string())
        .unwrap_or_default()
}

/// Drive login and callback, returning (access token, refresh cookie value)
macro_rules! sign_in {
    ($app:expr, $server:expr, $subject:expr, $email:expr) => {{
        let code = format!("code-{}", $subject);
        $server.provider.insert(code.clone(), $crate::common::identity($subject, $email));

        let req = actix_web::test::TestRequest::get()
            .uri("/api/auth/google/login")
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::TEMPORARY_REDIRECT);
        let state = $crate::common::response_cookie(&resp, "oauth_state").unwrap();
        let redirect = $crate::common::response_cookie(&resp, "oauth_redirect").unwrap();

        let req = actix_web::test::TestRequest::get()
            .uri(&format!(
                "/api/auth/google/callback?code={}&state={}",
                code,
                state.value()
            ))
            .cookie(state)
            .cookie(redirect)
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::TEMPORARY_REDIRECT);

        let access = $crate::common::access_token_from(&$crate::common::location(&resp));
        let refresh = $crate::common::response_cookie(&resp, "refresh_token").unwrap();
        (access, refresh.value().to_string())
    }};
}
