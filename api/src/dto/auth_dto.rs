use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use idp_core::domain::entities::token::{Claims, TokenPair};
use idp_core::domain::entities::user::{Role, User};

#[derive(Debug, Clone, Deserialize)]
pub struct LoginQuery {
    pub redirect_uri: Option<String>,
}

/// Query string the provider sends back to the callback
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set when the user denied consent
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, max = 512))]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            google_id: user.external_subject_id,
            name: user.name,
            avatar_url: user.avatar_url,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Result of `/api/auth/validate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub issuer: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<Claims> for ValidateResponse {
    fn from(claims: Claims) -> Self {
        Self {
            valid: true,
            expires_at: Utc.timestamp_opt(claims.exp, 0).single(),
            user_id: claims.sub,
            email: claims.email,
            name: claims.name,
            role: claims.role,
            issuer: claims.iss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_request_body_is_optional_field() {
        let request: RefreshTokenRequest = serde_json::from_str("{}").unwrap();
        assert!(request.refresh_token.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_refresh_token_fails_validation() {
        let request = RefreshTokenRequest {
            refresh_token: Some(String::new()),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_user_response_omits_missing_optionals() {
        let user = User::new("a@x.com", "Ada", Utc::now());
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("avatar_url").is_none());
        assert_eq!(json["role"], "user");
    }
}
