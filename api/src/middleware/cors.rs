//! CORS configuration for browser clients.
//!
//! Only the configured front-end origins may call the API, with credentials
//! so the `refresh_token` cookie travels on refresh and logout.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use idp_shared::CorsConfig;

pub fn create_cors(config: &CorsConfig) -> Cors {
    log::info!(
        "Configuring CORS for {} origin(s)",
        config.allowed_origins.len()
    );

    let cors = config
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));

    cors.allowed_methods(vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allowed_headers(vec![
        header::ACCEPT,
        header::AUTHORIZATION,
        header::CONTENT_TYPE,
        header::HeaderName::from_static("x-csrf-token"),
    ])
    .supports_credentials()
    .max_age(config.max_age)
}
