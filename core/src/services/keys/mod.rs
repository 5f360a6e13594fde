//! RS256 signing key pair and its public exports

mod key_material;

pub use key_material::{Jwk, JwkSet, KeyMaterial};
