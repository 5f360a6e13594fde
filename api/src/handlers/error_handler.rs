//! Mapping from domain errors to HTTP responses

use actix_web::{http::StatusCode, HttpResponse};
use validator::ValidationErrors;

use idp_core::errors::{AuthError, DomainError, TokenError};
use idp_shared::{error_codes, ErrorResponse};

/// Convert a domain error into the JSON error response
///
/// Server-side failures are logged with their detail; the response carries
/// only a generic message.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let (status, code, message) = match &error {
        DomainError::Auth(auth) => auth_error_parts(auth),
        DomainError::Token(token) => token_error_parts(token),
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            error_codes::VALIDATION_ERROR,
            message.clone(),
        ),
        DomainError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            "Resource not found".to_string(),
        ),
        DomainError::Persistence { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::PERSISTENCE_FAILED,
            "Service temporarily unavailable, please retry".to_string(),
        ),
        DomainError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "An internal error occurred".to_string(),
        ),
    };

    if status.is_server_error() {
        log::error!("Domain error: {}", error);
    } else {
        log::debug!("Request rejected: {}", error);
    }

    HttpResponse::build(status).json(ErrorResponse::new(code, message))
}

/// Response for a failed access token validation
pub fn token_error_response(error: &TokenError) -> HttpResponse {
    let (status, code, message) = token_error_parts(error);
    HttpResponse::build(status).json(ErrorResponse::new(code, message))
}

pub fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::BAD_REQUEST, message))
}

pub fn validation_error(errors: &ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request body")
            .add_detail("fields", errors.field_errors().keys().collect::<Vec<_>>()),
    )
}

fn auth_error_parts(error: &AuthError) -> (StatusCode, &'static str, String) {
    match error {
        AuthError::ExchangeFailed { .. } => (
            StatusCode::BAD_GATEWAY,
            error_codes::OAUTH_EXCHANGE_FAILED,
            "Could not complete sign-in with the identity provider".to_string(),
        ),
        AuthError::ProfileFetchFailed { .. } => (
            StatusCode::BAD_GATEWAY,
            error_codes::OAUTH_PROFILE_FAILED,
            "Could not read the profile from the identity provider".to_string(),
        ),
        AuthError::InvalidState => (
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_STATE,
            "Login session is invalid or has expired".to_string(),
        ),
        AuthError::InvalidRedirectTarget { .. } => (
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_REDIRECT,
            "Invalid redirect_uri".to_string(),
        ),
        AuthError::UserInactive => (
            StatusCode::FORBIDDEN,
            error_codes::USER_INACTIVE,
            "User account is inactive".to_string(),
        ),
        AuthError::EmailConflict => (
            StatusCode::CONFLICT,
            error_codes::EMAIL_CONFLICT,
            "Email is already linked to another account".to_string(),
        ),
    }
}

fn token_error_parts(error: &TokenError) -> (StatusCode, &'static str, String) {
    match error {
        TokenError::InvalidRefreshToken => (
            StatusCode::UNAUTHORIZED,
            error_codes::INVALID_REFRESH_TOKEN,
            "Refresh token is invalid, please sign in again".to_string(),
        ),
        TokenError::InvalidToken => (
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_INVALID,
            "Invalid token".to_string(),
        ),
        TokenError::Expired => (
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_EXPIRED,
            "Token expired".to_string(),
        ),
        TokenError::MalformedToken => (
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_MALFORMED,
            "Malformed token".to_string(),
        ),
        TokenError::SigningFailed { .. } | TokenError::KeyLoad { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "An internal error occurred".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::from(AuthError::InvalidState), 400),
            (DomainError::from(AuthError::UserInactive), 403),
            (DomainError::from(AuthError::EmailConflict), 409),
            (
                DomainError::from(AuthError::ExchangeFailed { message: "x".into() }),
                502,
            ),
            (DomainError::from(TokenError::InvalidRefreshToken), 401),
            (DomainError::from(TokenError::Expired), 401),
            (DomainError::persistence("db down"), 503),
            (DomainError::internal("boom"), 500),
            (DomainError::NotFound { resource: "user".into() }, 404),
        ];

        for (error, status) in cases {
            assert_eq!(handle_domain_error(error).status().as_u16(), status);
        }
    }
}
