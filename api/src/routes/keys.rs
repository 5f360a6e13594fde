//! Public verification key endpoints
//!
//! Relying services fetch the key once and validate access tokens locally.

use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::{web, HttpResponse};

use crate::app::AppState;

const KEY_CACHE_SECS: u32 = 3600;

/// Handler for GET /api/public-key
///
/// Returns the SPKI PEM of the signing key as `text/plain`.
pub async fn public_key(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header(CacheControl(vec![
            CacheDirective::Public,
            CacheDirective::MaxAge(KEY_CACHE_SECS),
        ]))
        .body(state.auth.public_signing_key().to_string())
}

/// Handler for GET /.well-known/jwks.json
pub async fn jwks(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(CacheControl(vec![
            CacheDirective::Public,
            CacheDirective::MaxAge(KEY_CACHE_SECS),
        ]))
        .json(state.auth.jwks())
}
