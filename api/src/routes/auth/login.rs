use actix_web::{http::header::LOCATION, web, HttpResponse};

use crate::app::AppState;
use crate::dto::LoginQuery;
use crate::handlers::handle_domain_error;

use super::cookies::{login_state_cookie, REDIRECT_COOKIE, STATE_COOKIE};

/// Handler for GET /api/auth/google/login
///
/// Redirects the browser to Google. The CSRF state and the post-login
/// redirect target travel in short-lived cookies until the callback.
///
/// # Query
/// - `redirect_uri` (optional): front-end URL to return to; must belong to
///   an allowed origin. Defaults to the first allowed origin.
///
/// # Errors
/// - 400 `INVALID_REDIRECT`: redirect target outside the allowed origins
/// - 503 `PERSISTENCE_FAILED`: the login state could not be stored
pub async fn google_login(
    state: web::Data<AppState>,
    query: web::Query<LoginQuery>,
) -> HttpResponse {
    let redirect_target = query
        .redirect_uri
        .as_deref()
        .filter(|uri| !uri.is_empty())
        .unwrap_or(state.default_redirect.as_str())
        .to_string();

    match state.auth.begin_login(&redirect_target).await {
        Ok(challenge) => HttpResponse::TemporaryRedirect()
            .insert_header((LOCATION, challenge.authorization_url))
            .cookie(login_state_cookie(STATE_COOKIE, challenge.state, &state.cookies))
            .cookie(login_state_cookie(REDIRECT_COOKIE, redirect_target, &state.cookies))
            .finish(),
        Err(error) => handle_domain_error(error),
    }
}
