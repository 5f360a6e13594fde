//! RSA key material for signing and verifying access tokens

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{DecodingKey, EncodingKey};
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePrivateKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::TokenError;

/// JSON Web Key for the RS256 verification key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(rename = "use")]
    pub key_use: String,
    pub alg: String,
    pub kid: String,
    /// Modulus, base64url without padding
    pub n: String,
    /// Public exponent, base64url without padding
    pub e: String,
}

/// JWK set document served at the well-known endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

/// The service's signing key pair
///
/// Built once at startup and shared behind an `Arc`. Never mutated.
#[derive(Clone)]
pub struct KeyMaterial {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    public_key_pem: String,
    jwk: Jwk,
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("kid", &self.jwk.kid)
            .finish_non_exhaustive()
    }
}

fn key_error(message: impl Into<String>) -> TokenError {
    TokenError::KeyLoad {
        message: message.into(),
    }
}

impl KeyMaterial {
    /// Load the private key from a PEM file
    ///
    /// # Arguments
    ///
    /// * `path` - PKCS#1 (`RSA PRIVATE KEY`) or PKCS#8 (`PRIVATE KEY`) PEM file
    ///
    /// # Returns
    ///
    /// * `Ok(KeyMaterial)` - Key pair ready for signing
    /// * `Err(TokenError::KeyLoad)` - File unreadable or not an RSA key
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TokenError> {
        let path = path.as_ref();
        let pem = fs::read_to_string(path)
            .map_err(|e| key_error(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_private_pem(&pem)
    }

    /// Build from a PEM string, PKCS#8 or PKCS#1
    pub fn from_private_pem(pem: &str) -> Result<Self, TokenError> {
        let private_key = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|e| key_error(format!("invalid RSA private key: {}", e)))?;
        Self::from_rsa_key(private_key)
    }

    /// Generate a fresh key pair; only for throwaway setups
    pub fn generate(bits: usize) -> Result<Self, TokenError> {
        let private_key = RsaPrivateKey::new(&mut rand::rngs::OsRng, bits)
            .map_err(|e| key_error(format!("key generation failed: {}", e)))?;
        Self::from_rsa_key(private_key)
    }

    fn from_rsa_key(private_key: RsaPrivateKey) -> Result<Self, TokenError> {
        let public_key = RsaPublicKey::from(&private_key);

        let private_der = private_key
            .to_pkcs1_der()
            .map_err(|e| key_error(format!("failed to encode private key: {}", e)))?;
        let encoding_key = EncodingKey::from_rsa_der(private_der.as_bytes());

        let public_key_pem = public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| key_error(format!("failed to encode public key: {}", e)))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| key_error(format!("failed to load public key: {}", e)))?;

        let spki_der = public_key
            .to_public_key_der()
            .map_err(|e| key_error(format!("failed to encode public key: {}", e)))?;
        let kid = URL_SAFE_NO_PAD.encode(Sha256::digest(spki_der.as_bytes()));

        let jwk = Jwk {
            kty: "RSA".to_string(),
            key_use: "sig".to_string(),
            alg: "RS256".to_string(),
            kid,
            n: URL_SAFE_NO_PAD.encode(public_key.n().to_bytes_be()),
            e: URL_SAFE_NO_PAD.encode(public_key.e().to_bytes_be()),
        };

        Ok(Self {
            encoding_key,
            decoding_key,
            public_key_pem,
            jwk,
        })
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Key id stamped into every token header
    pub fn key_id(&self) -> &str {
        &self.jwk.kid
    }

    /// SPKI `PUBLIC KEY` PEM of the verification key
    pub fn public_key_pem(&self) -> &str {
        &self.public_key_pem
    }

    pub fn jwks(&self) -> JwkSet {
        JwkSet {
            keys: vec![self.jwk.clone()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{FOREIGN_KEY_PEM, SIGNING_KEY_PEM, SIGNING_PUBLIC_KEY_PEM};

    #[test]
    fn test_loads_pkcs8_and_pkcs1_keys() {
        let pkcs8 = KeyMaterial::from_private_pem(SIGNING_KEY_PEM).unwrap();
        let pkcs1 = KeyMaterial::from_private_pem(FOREIGN_KEY_PEM).unwrap();
        assert_ne!(pkcs8.key_id(), pkcs1.key_id());
    }

    #[test]
    fn test_public_key_pem_matches_openssl_export() {
        let keys = KeyMaterial::from_private_pem(SIGNING_KEY_PEM).unwrap();
        assert_eq!(keys.public_key_pem().trim(), SIGNING_PUBLIC_KEY_PEM.trim());
    }

    #[test]
    fn test_public_exports_are_stable() {
        let first = KeyMaterial::from_private_pem(SIGNING_KEY_PEM).unwrap();
        let second = KeyMaterial::from_private_pem(SIGNING_KEY_PEM).unwrap();
        assert_eq!(first.public_key_pem(), second.public_key_pem());
        assert_eq!(first.jwks(), second.jwks());
    }

    #[test]
    fn test_jwks_shape() {
        let keys = KeyMaterial::from_private_pem(SIGNING_KEY_PEM).unwrap();
        let json = serde_json::to_value(keys.jwks()).unwrap();
        let jwk = &json["keys"][0];
        assert_eq!(jwk["kty"], "RSA");
        assert_eq!(jwk["use"], "sig");
        assert_eq!(jwk["alg"], "RS256");
        assert_eq!(jwk["e"], "AQAB");
        assert_eq!(jwk["kid"], keys.key_id());
    }

    #[test]
    fn test_rejects_garbage_and_missing_files() {
        assert!(matches!(
            KeyMaterial::from_private_pem("not a key"),
            Err(TokenError::KeyLoad { .. })
        ));
        assert!(matches!(
            KeyMaterial::load("/nonexistent/private_key.pem"),
            Err(TokenError::KeyLoad { .. })
        ));
    }

    #[test]
    fn test_debug_hides_key() {
        let keys = KeyMaterial::from_private_pem(SIGNING_KEY_PEM).unwrap();
        let debug = format!("{:?}", keys);
        assert!(debug.contains("kid"));
        assert!(!debug.contains("PRIVATE"));
    }
}
