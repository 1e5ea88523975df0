use chrono::Duration;
use jsonwebtoken::Algorithm;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenType;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Process-wide token settings, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSettings {
    pub algorithm: Algorithm,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::HS256,
            access_token_ttl: Duration::minutes(30),
            refresh_token_ttl: Duration::days(7),
        }
    }
}

/// Authentication coordinator combining password verification and JWT generation.
///
/// Provides high-level authentication operations by coordinating
/// password hashing and JWT token handling. Built once at startup and shared.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    settings: TokenSettings,
}

/// Access and refresh token issued together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with default token settings
    /// (HS256, 30 minute access tokens, 7 day refresh tokens).
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            settings: TokenSettings::default(),
        }
    }

    /// Create an authenticator with explicit token settings.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Configured algorithm is not an HMAC variant
    pub fn with_settings(jwt_secret: &[u8], settings: TokenSettings) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::with_algorithm(jwt_secret, settings.algorithm)?,
            settings,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a short-lived access token for `subject`.
    pub fn issue_access_token(&self, subject: &str) -> Result<String, JwtError> {
        self.jwt_handler
            .issue(subject, TokenType::Access, self.settings.access_token_ttl)
    }

    /// Issue a long-lived refresh token for `subject`.
    pub fn issue_refresh_token(&self, subject: &str) -> Result<String, JwtError> {
        self.jwt_handler
            .issue(subject, TokenType::Refresh, self.settings.refresh_token_ttl)
    }

    /// Issue an access token and a refresh token for `subject`.
    pub fn issue_token_pair(&self, subject: &str) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(subject)?,
            refresh_token: self.issue_refresh_token(subject)?,
        })
    }

    /// Verify credentials and issue a token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identifier to embed in both tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or hash is unusable)
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token_pair(subject)?)
    }

    /// Validate and decode a JWT token.
    ///
    /// # Errors
    /// * `InvalidToken` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
