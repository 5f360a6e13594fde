//! OAuth identity exchange
//!
//! `IdentityExchanger` owns the CSRF state handshake and drives an
//! `OAuthProvider` through the code exchange and profile fetch.

mod exchanger;
mod mock;
mod provider;

#[cfg(test)]
mod tests;

pub use exchanger::{IdentityExchanger, IdentityExchangerConfig};
pub use mock::MockOAuthProvider;
pub use provider::OAuthProvider;
