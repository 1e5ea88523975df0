use std::str::FromStr;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::JwtError;

/// Purpose tag carried in every issued token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Short-lived token authorizing API calls
    Access,
    /// Long-lived token only good for obtaining new access tokens
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl FromStr for TokenType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "access" => Ok(TokenType::Access),
            "refresh" => Ok(TokenType::Refresh),
            other => Err(format!("unknown token type: {}", other)),
        }
    }
}

/// JWT claims issued by this service.
///
/// `kind` is kept as the raw string from the payload so that a correctly
/// signed token with an unexpected type can still be decoded and rejected
/// by the caller for its purpose rather than for its structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Token purpose, `access` or `refresh`
    #[serde(rename = "type")]
    pub kind: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// JWT ID, unique per issued token
    pub jti: String,
}

impl Claims {
    /// Create claims for a subject that expire `ttl` from now.
    ///
    /// # Arguments
    /// * `subject` - Identifier the token asserts
    /// * `token_type` - Purpose of the token
    /// * `ttl` - Lifetime; a negative value yields an already expired token
    ///
    /// # Returns
    /// Claims with sub, type, iat, exp and a fresh jti
    ///
    /// # Errors
    /// * `InvalidLifetime` - Expiry falls outside the representable time range
    pub fn new(
        subject: impl ToString,
        token_type: TokenType,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(ttl)
            .ok_or_else(|| JwtError::InvalidLifetime(format!("{} seconds", ttl.num_seconds())))?;

        Ok(Self {
            sub: subject.to_string(),
            kind: token_type.as_str().to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Parsed token type, `None` if the payload carries an unknown tag.
    pub fn token_type(&self) -> Option<TokenType> {
        self.kind.parse().ok()
    }

    /// Check whether the token was issued for the given purpose.
    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type() == Some(token_type)
    }
}
