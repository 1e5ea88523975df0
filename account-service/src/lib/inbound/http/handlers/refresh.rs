use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::authentication::models::RefreshResult;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RefreshRequestBody>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    state
        .auth_service
        .refresh(&body.refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|result| ApiSuccess::new(StatusCode::OK, result.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequestBody {
    refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub access_token: String,
    pub token_type: String,
}

impl From<RefreshResult> for RefreshResponseData {
    fn from(result: RefreshResult) -> Self {
        Self {
            access_token: result.access_token,
            token_type: result.token_type.to_string(),
        }
    }
}
