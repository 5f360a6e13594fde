//! PostgreSQL implementations of the core repository ports

mod audit_sink_impl;
mod token_repository_impl;
mod user_repository_impl;

pub use audit_sink_impl::PostgresAuditSink;
pub use token_repository_impl::PostgresTokenRepository;
pub use user_repository_impl::PostgresUserRepository;

use idp_core::errors::DomainError;

/// Map a driver error onto the domain taxonomy
///
/// Details stay in the log; the domain error only names the operation.
pub(crate) fn db_error(operation: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(operation, error = %e, "database operation failed");
    DomainError::persistence(format!("{} failed", operation))
}
