use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::Claims;
use super::claims::TokenType;
use super::errors::JwtError;

/// JWT token handler for issuing and decoding tokens.
///
/// Signs with a symmetric secret using the HMAC family (HS256 by default).
/// The key is fixed for the handler's lifetime; replacing it invalidates
/// every token issued before.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Create a JWT handler for a specific HMAC algorithm.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Algorithm is not HS256, HS384 or HS512
    pub fn with_algorithm(secret: &[u8], algorithm: Algorithm) -> Result<Self, JwtError> {
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(Self {
                algorithm,
                ..Self::new(secret)
            }),
            other => Err(JwtError::UnsupportedAlgorithm(format!("{:?}", other))),
        }
    }

    /// Encode claims into a JWT token.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode (must implement Serialize)
    ///
    /// # Returns
    /// JWT token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Issue a signed token for `subject` that expires after `ttl`.
    ///
    /// # Errors
    /// * `InvalidLifetime` - Expiry is outside the representable time range
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: &str,
        token_type: TokenType,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        self.encode(&Claims::new(subject, token_type, ttl)?)
    }

    /// Decode and validate a token issued by [`JwtHandler::issue`].
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, structure or expiry check failed
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        self.decode_as(token)
    }

    /// Decode and validate a JWT token into any claims type.
    ///
    /// `exp` is mandatory and checked without leeway.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, structure or expiry check failed
    pub fn decode_as<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }
}

/// Parse a configured algorithm identifier such as `"HS256"`.
///
/// # Errors
/// * `UnsupportedAlgorithm` - Identifier is not a known JWT algorithm
pub fn parse_algorithm(name: &str) -> Result<Algorithm, JwtError> {
    Algorithm::from_str(name.trim()).map_err(|_| JwtError::UnsupportedAlgorithm(name.to_string()))
}
