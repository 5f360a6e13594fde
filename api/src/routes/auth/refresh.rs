use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use idp_core::errors::TokenError;

use crate::app::AppState;
use crate::dto::{RefreshTokenRequest, TokenResponse};
use crate::handlers::{client_info, handle_domain_error, validation_error};

use super::cookies::{cookie_value, refresh_cookie, REFRESH_COOKIE};

/// Handler for POST /api/auth/refresh
///
/// Rotates the refresh token. The token is read from the `refresh_token`
/// cookie, or from the JSON body for non-browser clients.
///
/// # Request Body (optional)
///
/// ```json
/// { "refresh_token": "string" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "0f8c...e1.Qm9...",
///     "token_type": "Bearer",
///     "expires_in": 900
/// }
/// ```
/// The rotated token is also set as the new cookie.
///
/// ## Errors
/// - 401 `INVALID_REFRESH_TOKEN`: missing, unknown, expired or already used
/// - 503 `PERSISTENCE_FAILED`: storage failure; the presented token still works
pub async fn refresh(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse {
    let body = body.map(web::Json::into_inner);
    if let Some(request) = &body {
        if let Err(errors) = request.validate() {
            return validation_error(&errors);
        }
    }

    let presented = cookie_value(&req, REFRESH_COOKIE)
        .or_else(|| body.and_then(|request| request.refresh_token));
    let presented = match presented {
        Some(token) => token,
        None => return handle_domain_error(TokenError::InvalidRefreshToken.into()),
    };

    match state.auth.refresh(&presented, &client_info(&req)).await {
        Ok(pair) => {
            let cookie = refresh_cookie(pair.refresh_token.clone(), &state.cookies);
            HttpResponse::Ok()
                .cookie(cookie)
                .json(TokenResponse::from(pair))
        }
        Err(error) => handle_domain_error(error),
    }
}
