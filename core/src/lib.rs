//! # Identity Provider Core
//!
//! Domain layer for the identity provider: entities, the error taxonomy,
//! repository and port traits (with in-memory implementations), and the
//! token lifecycle services that sit between an OAuth login and the
//! access/refresh tokens handed to clients.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

#[cfg(test)]
pub(crate) mod test_fixtures;

// Re-export commonly used types for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use domain::entities::{
    AuditAction, AuditEvent, Claims, ClientInfo, ExternalIdentity, LoginChallenge,
    OpaqueRefreshToken, PendingLogin, ProviderGrant, RefreshToken, Role, TokenPair, User,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{
    AuditSink, InMemoryLoginStateStore, LoginStateStore, MockAuditSink, MockTokenRepository,
    MockUserRepository, TokenRepository, TracingAuditSink, UserRepository,
};
pub use services::{
    AccessValidator, AdminAllowList, AuditRecorder, AuthDependencies, AuthService,
    AuthServiceConfig, IdentityExchanger, IdentityExchangerConfig, Jwk, JwkSet, KeyMaterial,
    LoginOutcome, MockOAuthProvider, OAuthProvider, Reconciliation, Rotation, TokenIssuer,
    TokenRotator, TokenServiceConfig, UserDirectory,
};
