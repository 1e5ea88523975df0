use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::models::UserProfile;
use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn current_user(
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&user).into()))
}

/// Public user view. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<&UserProfile> for UserData {
    fn from(user: &UserProfile) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            username: user.username.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}
