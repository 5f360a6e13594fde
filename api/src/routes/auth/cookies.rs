//! Cookies set by the login flow

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse};

use crate::app::CookieSettings;

pub const REFRESH_COOKIE: &str = "refresh_token";
pub const STATE_COOKIE: &str = "oauth_state";
pub const REDIRECT_COOKIE: &str = "oauth_redirect";

/// Short-lived cookie carrying the pending login between redirect and callback
///
/// `Lax` so it survives the top-level navigation back from the provider.
pub fn login_state_cookie(
    name: &'static str,
    value: String,
    settings: &CookieSettings,
) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(settings.login_state_max_age))
        .finish()
}

pub fn refresh_cookie(value: String, settings: &CookieSettings) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE, value)
        .path("/")
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(settings.refresh_max_age))
        .finish()
}

/// Expire a cookie on the client
pub fn clear_cookie(response: &mut HttpResponse, name: &'static str) {
    let cookie = Cookie::build(name, "").path("/").finish();
    if let Err(err) = response.add_removal_cookie(&cookie) {
        log::warn!("Failed to clear cookie {}: {}", name, err);
    }
}

pub fn cookie_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.cookie(name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_cookie_attributes() {
        let settings = CookieSettings {
            secure: true,
            ..CookieSettings::default()
        };
        let cookie = refresh_cookie("abc.def".to_string(), &settings);

        assert_eq!(cookie.name(), REFRESH_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(
            cookie.max_age(),
            Some(Duration::seconds(settings.refresh_max_age))
        );
    }

    #[test]
    fn test_login_state_cookie_is_lax() {
        let cookie = login_state_cookie(STATE_COOKIE, "s".to_string(), &CookieSettings::default());
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(600)));
    }
}
