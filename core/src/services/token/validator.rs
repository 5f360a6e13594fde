//! Access token validation

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, Validation};

use crate::clock::Clock;
use crate::domain::entities::token::Claims;
use crate::errors::TokenError;
use crate::services::keys::KeyMaterial;

/// Verifies access tokens against the public key
///
/// Pure function of the token, the key and the clock. No storage access.
pub struct AccessValidator {
    keys: Arc<KeyMaterial>,
    clock: Arc<dyn Clock>,
    validation: Validation,
}

impl AccessValidator {
    pub fn new(keys: Arc<KeyMaterial>, clock: Arc<dyn Clock>, issuer: &str) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = 0;
        // expiry is checked against the injected clock below
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            keys,
            clock,
            validation,
        }
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    ///
    /// * `InvalidToken` - Bad signature, foreign key, wrong algorithm or issuer
    /// * `Expired` - `exp` is at or before now
    /// * `MalformedToken` - Not a JWT or claims missing
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, self.keys.decoding_key(), &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_)
                | ErrorKind::MissingRequiredClaim(_) => TokenError::MalformedToken,
                _ => TokenError::InvalidToken,
            })?;

        if data.claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::Expired);
        }
        Ok(data.claims)
    }
}
