use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;
use std::sync::Arc;

pub struct HealthAppState {
    /// "generative" or "keyword"
    pub mode: &'static str,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    mode: &'static str,
}

pub fn create_health_router(state: HealthAppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(Arc::new(state))
}

/// GET /health
async fn health(State(state): State<Arc<HealthAppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        mode: state.mode,
    })
}
