use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::application::AverageService;
use crate::domain::{Category, InvalidCategory, WindowSnapshot};

/// Errors surfaced to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidCategory(#[from] InvalidCategory),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::InvalidCategory(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub average_service: Arc<AverageService>,
}

/// Response for /api/health
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub window_size: usize,
    pub timestamp: String,
}

/// Handler for GET /api/health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "numwin",
        window_size: state.average_service.window_size(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Handler for GET /numbers/{numberid}
pub async fn numbers_handler(
    State(state): State<AppState>,
    Path(number_id): Path<String>,
) -> Result<Json<WindowSnapshot>, ApiError> {
    let category: Category = number_id.parse()?;
    Ok(Json(state.average_service.calculate(category).await))
}

/// Handler for GET /numbers
pub async fn window_handler(State(state): State<AppState>) -> Json<WindowSnapshot> {
    Json(state.average_service.peek())
}
