use actix_web::http::header::USER_AGENT;
use actix_web::HttpRequest;

use idp_core::domain::entities::audit::ClientInfo;

/// Source address and user agent of a request, for audit events
pub fn client_info(req: &HttpRequest) -> ClientInfo {
    let source_address = req
        .connection_info()
        .realip_remote_addr()
        .map(str::to_string);
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    ClientInfo::new(source_address, user_agent)
}
