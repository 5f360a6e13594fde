//! Authentication route handlers
//!
//! - Google login redirect and callback
//! - Token refresh
//! - Logout
//! - Current user and token validation (bearer protected)

pub mod callback;
pub mod cookies;
pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod validate;
