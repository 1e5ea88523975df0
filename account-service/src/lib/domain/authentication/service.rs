use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::TokenType;
use chrono::Utc;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AuthResult;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::RefreshResult;
use crate::domain::authentication::models::RegisterCommand;
use crate::domain::authentication::models::UserProfile;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Domain service implementation for authentication operations.
///
/// Holds no per-request state; the authenticator carries the read-only
/// signing key and token lifetimes.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User store implementation
    /// * `authenticator` - Password hasher and token codec built from configuration
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Decode a token, collapsing every codec failure into `InvalidToken`.
    fn decode(&self, token: &str) -> Result<auth::Claims, AuthError> {
        self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AuthError::InvalidToken
        })
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthResult, AuthError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            tracing::info!(email = %command.email, "Registration rejected: email taken");
            return Err(AuthError::DuplicateEmail(command.email.to_string()));
        }

        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            tracing::info!(username = %command.username, "Registration rejected: username taken");
            return Err(AuthError::DuplicateUsername(command.username.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        // The store re-checks uniqueness atomically; a racing registration
        // surfaces here as a duplicate error.
        let created_user = self.repository.create(user).await?;

        let tokens = self
            .authenticator
            .issue_token_pair(&created_user.id.to_string())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(AuthResult::new(tokens, &created_user))
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthResult, AuthError> {
        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            tracing::info!("Login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        };

        let tokens = self
            .authenticator
            .authenticate(
                command.password.expose(),
                &user.password_hash,
                &user.id.to_string(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::info!("Login rejected: invalid credentials");
                    AuthError::InvalidCredentials
                }
                AuthenticationError::JwtError(err) => AuthError::Internal(err.to_string()),
            })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthResult::new(tokens, &user))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResult, AuthError> {
        let claims = self.decode(refresh_token)?;

        if !claims.is(TokenType::Refresh) {
            tracing::info!(token_type = %claims.kind, "Refresh rejected: wrong token type");
            return Err(AuthError::WrongTokenType);
        }

        let user_id = UserId::from_string(&claims.sub).map_err(|e| {
            tracing::debug!(error = %e, "Refresh rejected: malformed subject");
            AuthError::InvalidToken
        })?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| {
                tracing::info!(user_id = %user_id, "Refresh rejected: user no longer exists");
                AuthError::UserNotFound
            })?;

        let access_token = self
            .authenticator
            .issue_access_token(&user.id.to_string())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::debug!(user_id = %user.id, "Access token refreshed");

        Ok(RefreshResult::new(access_token))
    }

    async fn current_user(&self, access_token: &str) -> Result<UserProfile, AuthError> {
        let claims = self.decode(access_token)?;

        if !claims.is(TokenType::Access) {
            return Err(AuthError::InvalidToken);
        }

        let user_id = UserId::from_string(&claims.sub).map_err(|_| AuthError::InvalidToken)?;

        self.repository
            .find_by_id(&user_id)
            .await?
            .map(|ref user| user.into())
            .ok_or(AuthError::InvalidToken)
    }
}
