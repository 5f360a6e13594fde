use actix_web::{web, HttpResponse};

use idp_core::domain::entities::token::Claims;

use crate::dto::ValidateResponse;

/// Handler for GET /api/auth/validate
///
/// The bearer token has already been checked by `JwtAuth`; this echoes the
/// validated claims.
pub async fn validate(claims: web::ReqData<Claims>) -> HttpResponse {
    HttpResponse::Ok().json(ValidateResponse::from(claims.into_inner()))
}
