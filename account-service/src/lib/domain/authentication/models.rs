use auth::TokenPair;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Token type label returned with every issued access token.
pub const BEARER: &str = "bearer";

/// Command to register a new account with validated inputs
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub username: Username,
    pub password: Password,
}

impl RegisterCommand {
    /// # Arguments
    /// * `email` - Validated email address
    /// * `username` - Validated username
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(email: EmailAddress, username: Username, password: Password) -> Self {
        Self {
            email,
            username,
            password,
        }
    }
}

/// Command to log in with email and password
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: Password,
}

impl LoginCommand {
    pub fn new(email: EmailAddress, password: Password) -> Self {
        Self { email, password }
    }
}

/// Public view of a user, safe to hand to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub email: EmailAddress,
    pub username: Username,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            created_at: user.created_at,
        }
    }
}

/// Outcome of a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub user: UserProfile,
}

impl AuthResult {
    pub fn new(tokens: TokenPair, user: &User) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: BEARER,
            user: user.into(),
        }
    }
}

/// Outcome of a successful refresh: a new access token only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshResult {
    pub access_token: String,
    pub token_type: &'static str,
}

impl RefreshResult {
    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            token_type: BEARER,
        }
    }
}
