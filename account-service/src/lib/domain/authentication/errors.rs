use thiserror::Error;

use crate::user::errors::UserError;

/// Failure kinds of the authentication operations.
///
/// `InvalidCredentials` covers both an unknown email and a wrong password,
/// and `InvalidToken` covers bad signatures, malformed tokens and expiry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token is not a refresh token")]
    WrongTokenType,

    #[error("User not found")]
    UserNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(email) => AuthError::DuplicateEmail(email),
            UserError::UsernameAlreadyExists(username) => AuthError::DuplicateUsername(username),
            UserError::DatabaseError(_) => AuthError::Internal(err.to_string()),
        }
    }
}
