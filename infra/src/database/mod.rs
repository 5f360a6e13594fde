//! Database module - PostgreSQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management and embedded migrations
//! - Repository implementations for users and refresh tokens
//! - The audit sink writing to `auth_audit_log`

pub mod connection;
pub mod postgres;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use postgres::{PostgresAuditSink, PostgresTokenRepository, PostgresUserRepository};
