//! Domain entities

pub mod audit;
pub mod identity;
pub mod token;
pub mod user;

pub use audit::{AuditAction, AuditEvent, ClientInfo};
pub use identity::{ExternalIdentity, LoginChallenge, PendingLogin, ProviderGrant};
pub use token::{Claims, OpaqueRefreshToken, RefreshToken, TokenPair};
pub use user::{Role, User};
