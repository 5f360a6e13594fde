//! Token lifecycle: issuance, rotation on use, revocation and validation

mod config;
mod hasher;
mod issuer;
mod rotator;
mod validator;

pub use config::TokenServiceConfig;
pub use hasher::RefreshTokenHasher;
pub use issuer::TokenIssuer;
pub use rotator::{Rotation, TokenRotator};
pub use validator::AccessValidator;

#[cfg(test)]
mod tests;
