//! Audit events emitted by the token lifecycle.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle action recorded in the audit trail
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Login,
    Logout,
    TokenRefresh,
}

impl AuditAction {
    /// Convert to string representation for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Login => "LOGIN",
            AuditAction::Logout => "LOGOUT",
            AuditAction::TokenRefresh => "TOKEN_REFRESH",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a request came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub source_address: Option<String>,
    pub user_agent: Option<String>,
}

impl ClientInfo {
    pub fn new(source_address: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            source_address,
            user_agent,
        }
    }
}

/// A single audit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub user_id: Option<Uuid>,
    pub action: AuditAction,
    pub source_address: Option<String>,
    pub user_agent: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(
        action: AuditAction,
        user_id: Option<Uuid>,
        client: &ClientInfo,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            action,
            source_address: client.source_address.clone(),
            user_agent: client.user_agent.clone(),
            occurred_at,
        }
    }
}
