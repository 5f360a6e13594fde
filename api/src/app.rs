//! Application state and factory
//!
//! This module holds the state shared by every worker and provides the
//! factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{middleware::Logger, web, App, HttpResponse};

use idp_core::services::AuthService;
use idp_shared::{error_codes, AppConfig, CorsConfig, ErrorResponse};

use crate::middleware::{cors::create_cors, JwtAuth};
use crate::routes::auth::{callback, login, logout, me, refresh, validate};
use crate::routes::{health, keys};

/// Attributes shared by the cookies this service sets
#[derive(Debug, Clone)]
pub struct CookieSettings {
    /// Mark cookies `Secure` (production)
    pub secure: bool,
    /// Lifetime of the `refresh_token` cookie in seconds
    pub refresh_max_age: i64,
    /// Lifetime of the `oauth_state` / `oauth_redirect` cookies in seconds
    pub login_state_max_age: i64,
}

impl CookieSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            secure: config.environment.is_production(),
            refresh_max_age: config.auth.jwt.refresh_token_ttl,
            login_state_max_age: config.auth.login_state_ttl,
        }
    }
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            secure: false,
            refresh_max_age: 7 * 24 * 60 * 60,
            login_state_max_age: 600,
        }
    }
}

/// State shared by all handlers
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub cookies: CookieSettings,
    /// Redirect used when a login starts without `redirect_uri`
    pub default_redirect: String,
}

impl AppState {
    pub fn new(
        auth: Arc<AuthService>,
        cookies: CookieSettings,
        default_redirect: impl Into<String>,
    ) -> Self {
        Self {
            auth,
            cookies,
            default_redirect: default_redirect.into(),
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
    cors: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let validator = state.auth.validator();

    App::new()
        .app_data(state)
        .wrap(create_cors(cors))
        .wrap(Logger::default())
        .route("/health", web::get().to(health::health_check))
        .route("/.well-known/jwks.json", web::get().to(keys::jwks))
        .service(
            web::scope("/api")
                .route("/public-key", web::get().to(keys::public_key))
                .service(
                    web::scope("/auth")
                        .route("/google/login", web::get().to(login::google_login))
                        .route("/google/callback", web::get().to(callback::google_callback))
                        .route("/refresh", web::post().to(refresh::refresh))
                        .route("/logout", web::post().to(logout::logout))
                        .service(
                            web::resource("/me")
                                .wrap(JwtAuth::new(validator.clone()))
                                .route(web::get().to(me::current_user)),
                        )
                        .service(
                            web::resource("/validate")
                                .wrap(JwtAuth::new(validator))
                                .route(web::get().to(validate::validate)),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
