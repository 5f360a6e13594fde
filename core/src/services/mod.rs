//! Services implementing the token lifecycle
//!
//! Leaf first: `keys` (signing key pair), `identity` (OAuth code exchange),
//! `directory` (user reconciliation), `token` (issue, rotate, validate),
//! `audit` (event emission) and `auth`, the facade the HTTP layer calls.

pub mod audit;
pub mod auth;
pub mod directory;
pub mod identity;
pub mod keys;
pub mod token;

mod timeout;

pub use audit::AuditRecorder;
pub use auth::{AuthDependencies, AuthService, AuthServiceConfig, LoginOutcome};
pub use directory::{AdminAllowList, Reconciliation, UserDirectory};
pub use identity::{IdentityExchanger, IdentityExchangerConfig, MockOAuthProvider, OAuthProvider};
pub use keys::{Jwk, JwkSet, KeyMaterial};
pub use token::{AccessValidator, Rotation, TokenIssuer, TokenRotator, TokenServiceConfig};
