//! Authentication service for API token validation.

use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Service for authenticating management API requests via Bearer tokens.
///
/// The configured API token is HMAC-SHA256-hashed (keyed by the signing
/// secret) once at startup; presented tokens are hashed the same way and the
/// MACs compared.
pub struct AuthService {
    signing_secret: String,
    api_token_mac: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `api_token` - the token clients must present
    /// - `signing_secret` - HMAC key; any change invalidates outstanding tokens
    pub fn new(api_token: &str, signing_secret: String) -> Self {
        let mut service = Self {
            signing_secret,
            api_token_mac: String::new(),
        };
        service.api_token_mac = service.hash_token(api_token);
        service
    }

    /// Hashes a raw token with HMAC-SHA256 using the signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Authenticates a presented bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when the token does not match.
    pub fn authenticate(&self, token: &str) -> Result<(), AppError> {
        if self.hash_token(token) != self.api_token_mac {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid token" }),
            ));
        }

        Ok(())
    }
}
