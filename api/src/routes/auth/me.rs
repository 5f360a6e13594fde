use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::UserResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;

/// Handler for GET /api/auth/me
pub async fn current_user(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    match state.auth.current_user(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(error) => handle_domain_error(error),
    }
}
