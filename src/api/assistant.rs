use crate::assistant::Assistant;
use crate::model::{AssistantRequest, AssistantResponse};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

/// Reply for any failure the assistant itself could not turn into a message
pub const GENERIC_ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

pub struct AssistantAppState {
    pub assistant: Arc<Assistant>,
}

/// Generic failure body, same shape as a reply with no data
#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    actions: Vec<serde_json::Value>,
}

pub fn create_assistant_router(state: AssistantAppState) -> Router {
    Router::new()
        .route("/assistant", post(ask))
        .with_state(Arc::new(state))
}

/// POST /assistant - Answer one chat message
///
/// The body is parsed by hand so a malformed request gets the generic reply
/// instead of axum's plain-text rejection.
async fn ask(
    State(state): State<Arc<AssistantAppState>>,
    body: Bytes,
) -> Result<Json<AssistantResponse>, AssistantError> {
    let request: AssistantRequest = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "Invalid assistant request body");
        AssistantError::InvalidBody
    })?;

    Ok(Json(state.assistant.respond(&request).await))
}

#[derive(Debug)]
enum AssistantError {
    InvalidBody,
}

impl IntoResponse for AssistantError {
    fn into_response(self) -> Response {
        let status = match self {
            AssistantError::InvalidBody => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            message: GENERIC_ERROR_MESSAGE.to_string(),
            actions: Vec::new(),
        });

        (status, body).into_response()
    }
}
