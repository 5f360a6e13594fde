//! Authentication facade
//!
//! `AuthService` ties the login flow, the user directory, the token
//! lifecycle and audit emission together. It is the only service the HTTP
//! layer talks to.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::{AuthDependencies, AuthService, LoginOutcome};
