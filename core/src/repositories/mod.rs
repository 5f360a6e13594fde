//! Repository and port traits consumed by the core services
//!
//! Each port ships with an in-memory implementation used by tests and by
//! single-instance development setups.

pub mod audit;
pub mod login_state;
pub mod token;
pub mod user;

pub use audit::{AuditSink, MockAuditSink, TracingAuditSink};
pub use login_state::{InMemoryLoginStateStore, LoginStateStore};
pub use token::{MockTokenRepository, TokenRepository};
pub use user::{MockUserRepository, UserRepository};
