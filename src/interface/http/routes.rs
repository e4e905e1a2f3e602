use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::application::AverageService;

use super::handlers::{health_handler, numbers_handler, window_handler, AppState};

pub fn create_router(average_service: Arc<AverageService>) -> Router {
    let state = AppState { average_service };

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/numbers", get(window_handler))
        .route("/numbers/{numberid}", get(numbers_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
