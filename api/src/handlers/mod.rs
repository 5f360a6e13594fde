//! Shared handler helpers

pub mod client;
pub mod error_handler;

pub use client::client_info;
pub use error_handler::{bad_request, handle_domain_error, token_error_response, validation_error};
