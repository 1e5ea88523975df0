use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::current_user::UserData;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::authentication::models::AuthResult;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordInputError;

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequestBody>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    state
        .auth_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|result| ApiSuccess::new(StatusCode::OK, result.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseLoginRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordInputError),
}

impl LoginRequestBody {
    fn try_into_command(self) -> Result<LoginCommand, ParseLoginRequestError> {
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(LoginCommand::new(email, password))
    }
}

impl From<ParseLoginRequestError> for ApiError {
    fn from(err: ParseLoginRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

/// Token pair plus the public user view, returned by register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: UserData,
}

impl From<AuthResult> for TokenResponseData {
    fn from(result: AuthResult) -> Self {
        Self {
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            token_type: result.token_type.to_string(),
            user: (&result.user).into(),
        }
    }
}
