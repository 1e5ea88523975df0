//! Authentication utilities library
//!
//! Provides the credential and token primitives used by the account service:
//! - Password hashing (Argon2id)
//! - Signed, expiring JWT access and refresh tokens
//! - Authentication coordination
//!
//! Services define their own authentication ports and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{JwtHandler, TokenType};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.issue("user123", TokenType::Access, Duration::minutes(30)).unwrap();
//! let claims = handler.decode(&token).unwrap();
//! assert!(claims.is(TokenType::Access));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue access + refresh tokens
//! let pair = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&pair.access_token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use authenticator::TokenSettings;
pub use jwt::parse_algorithm;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenType;
pub use password::PasswordError;
pub use password::PasswordHasher;
