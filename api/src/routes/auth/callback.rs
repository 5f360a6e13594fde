use actix_web::{http::header::LOCATION, web, HttpRequest, HttpResponse};

use idp_core::errors::AuthError;

use crate::app::AppState;
use crate::dto::CallbackQuery;
use crate::handlers::{bad_request, client_info, handle_domain_error};

use super::cookies::{clear_cookie, cookie_value, refresh_cookie, REDIRECT_COOKIE, STATE_COOKIE};

/// Handler for GET /api/auth/google/callback
///
/// Completes the login started by [`super::login::google_login`]. On success
/// the refresh token is set as an HttpOnly cookie and the browser is sent to
/// `<redirect>/auth/callback?access_token=...`.
///
/// # Errors
/// - 400 `BAD_REQUEST`: provider reported an error, or no code
/// - 400 `INVALID_STATE`: state missing, mismatched, reused or expired
/// - 403 `USER_INACTIVE`, 409 `EMAIL_CONFLICT`
/// - 502 `OAUTH_EXCHANGE_FAILED` / `OAUTH_PROFILE_FAILED`
/// - 503 `PERSISTENCE_FAILED`
pub async fn google_callback(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<CallbackQuery>,
) -> HttpResponse {
    let mut response = complete(&state, &req, query.into_inner()).await;

    clear_cookie(&mut response, STATE_COOKIE);
    clear_cookie(&mut response, REDIRECT_COOKIE);
    response
}

async fn complete(state: &AppState, req: &HttpRequest, query: CallbackQuery) -> HttpResponse {
    if let Some(error) = query.error {
        log::info!("Provider returned an error on callback: {}", error);
        return bad_request("Authorization was not granted");
    }

    let cookie_state = cookie_value(req, STATE_COOKIE);
    let redirect_target = cookie_value(req, REDIRECT_COOKIE);
    let (login_state, redirect_target) = match (query.state, cookie_state, redirect_target) {
        (Some(query_state), Some(cookie_state), Some(redirect)) if query_state == cookie_state => {
            (query_state, redirect)
        }
        _ => return handle_domain_error(AuthError::InvalidState.into()),
    };

    let code = match query.code.filter(|c| !c.is_empty()) {
        Some(code) => code,
        None => return bad_request("Missing authorization code"),
    };

    let client = client_info(req);
    match state
        .auth
        .complete_login(&code, &login_state, &redirect_target, &client)
        .await
    {
        Ok(outcome) => {
            let location = format!(
                "{}/auth/callback?access_token={}",
                outcome.redirect_target.trim_end_matches('/'),
                outcome.tokens.access_token
            );
            HttpResponse::TemporaryRedirect()
                .insert_header((LOCATION, location))
                .cookie(refresh_cookie(outcome.tokens.refresh_token, &state.cookies))
                .finish()
        }
        Err(error) => handle_domain_error(error),
    }
}
