//! HTTP surface of the identity provider
//!
//! Library half of the `idp_api` package so the integration tests can build
//! the same `App` the binary serves.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState, CookieSettings};
