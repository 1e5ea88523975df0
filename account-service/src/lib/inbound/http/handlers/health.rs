use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::inbound::http::router::AppState;

pub async fn root(State(state): State<AppState>) -> Json<WelcomeData> {
    Json(WelcomeData {
        message: format!("Welcome to {}", state.app_name),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn health() -> Json<HealthData> {
    Json(HealthData { status: "healthy" })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WelcomeData {
    pub message: String,
    pub version: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthData {
    pub status: &'static str,
}
