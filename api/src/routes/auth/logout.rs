use actix_web::{web, HttpRequest, HttpResponse};

use crate::app::AppState;
use crate::dto::{MessageResponse, RefreshTokenRequest};
use crate::handlers::{client_info, handle_domain_error};

use super::cookies::{clear_cookie, cookie_value, REFRESH_COOKIE};

/// Handler for POST /api/auth/logout
///
/// Revokes the presented refresh token (cookie or JSON body) and clears the
/// cookie. Succeeds even when no token, or an unknown one, is presented.
///
/// ## Errors
/// - 503 `PERSISTENCE_FAILED`: the revocation could not be stored
pub async fn logout(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse {
    let presented = cookie_value(&req, REFRESH_COOKIE)
        .or_else(|| body.and_then(|request| request.into_inner().refresh_token));

    if let Some(token) = presented {
        if let Err(error) = state.auth.logout(&token, &client_info(&req)).await {
            return handle_domain_error(error);
        }
    }

    let mut response = HttpResponse::Ok().json(MessageResponse::new("Logged out successfully"));
    clear_cookie(&mut response, REFRESH_COOKIE);
    response
}
