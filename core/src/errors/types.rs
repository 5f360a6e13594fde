//! Error types for the login flow and the token lifecycle

use thiserror::Error;

/// Login and identity errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Provider or network failure while exchanging the authorization code
    #[error("Code exchange failed: {message}")]
    ExchangeFailed { message: String },

    #[error("Profile fetch failed: {message}")]
    ProfileFetchFailed { message: String },

    /// CSRF state unknown, already consumed, expired or bound to another redirect
    #[error("Invalid login state")]
    InvalidState,

    #[error("Redirect target not allowed: {target}")]
    InvalidRedirectTarget { target: String },

    #[error("User inactive")]
    UserInactive,

    /// Email already belongs to an account bound to another provider subject
    #[error("Email already linked to another identity")]
    EmailConflict,
}

/// Token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Unknown, revoked, expired or already rotated refresh token
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// Bad signature, wrong key or wrong issuer
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    Expired,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token signing failed: {message}")]
    SigningFailed { message: String },

    #[error("Key load failed: {message}")]
    KeyLoad { message: String },
}
