use async_trait::async_trait;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AuthResult;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::RefreshResult;
use crate::domain::authentication::models::RegisterCommand;
use crate::domain::authentication::models::UserProfile;

/// Port for authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first token pair.
    ///
    /// # Arguments
    /// * `command` - Validated email, username and password
    ///
    /// # Returns
    /// Access and refresh tokens plus the public user view
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `DuplicateUsername` - Username is already taken
    /// * `Internal` - Store or token failure
    async fn register(&self, command: RegisterCommand) -> Result<AuthResult, AuthError>;

    /// Authenticate with email and password.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Internal` - Store or token failure
    async fn login(&self, command: LoginCommand) -> Result<AuthResult, AuthError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// The refresh token itself is not rotated and stays valid until it expires.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, structure or expiry check failed
    /// * `WrongTokenType` - Token was not issued as a refresh token
    /// * `UserNotFound` - Account no longer exists
    /// * `Internal` - Store or token failure
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResult, AuthError>;

    /// Resolve the user an access token was issued to.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is invalid, not an access token, or its user is gone
    /// * `Internal` - Store failure
    async fn current_user(&self, access_token: &str) -> Result<UserProfile, AuthError>;
}
