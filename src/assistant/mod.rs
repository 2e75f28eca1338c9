//! ARYA conversational assistant.
//!
//! A request is answered on exactly one of two paths, chosen once at startup by
//! [`AssistantMode`]:
//! - keyword: [`Intent::classify`] picks a domain handler that queries a provider and
//!   formats a templated reply;
//! - generative: provider data is summarised into a prompt for the model, and the model's
//!   reply is enriched with structured data when it mentions chargers, parking or routes.
//!
//! Neither path returns an error. Provider and model failures become neutral replies.

use crate::model::{AssistantRequest, AssistantResponse};
use crate::providers::{ChargerDirectory, MobilityData};
use std::sync::Arc;
use tracing::{info, Instrument};
use uuid::Uuid;

pub mod gemini;
mod generative;
mod handlers;
pub mod intent;
pub mod mode;


pub use gemini::{GeminiClient, GenerativeModel, ModelNotFound};
pub use generative::{APOLOGY_MESSAGE, SYSTEM_PROMPT};
pub use intent::Intent;
pub use mode::AssistantMode;

/// Page the route planner lives on in the dashboard
pub const ROUTES_PAGE: &str = "/app/routes";

/// Request handler shared by every connection. Holds only immutable state.
pub struct Assistant {
    mode: AssistantMode,
    chargers: Arc<dyn ChargerDirectory>,
    data: Arc<dyn MobilityData>,
    history_window: usize,
}

impl Assistant {
    pub fn new(
        mode: AssistantMode,
        chargers: Arc<dyn ChargerDirectory>,
        data: Arc<dyn MobilityData>,
    ) -> Self {
        Self {
            mode,
            chargers,
            data,
            history_window: 4,
        }
    }

    /// Number of trailing history messages quoted in the generative prompt.
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    pub fn mode(&self) -> &AssistantMode {
        &self.mode
    }

    pub async fn respond(&self, request: &AssistantRequest) -> AssistantResponse {
        let span = tracing::info_span!(
            "assistant",
            request_id = %Uuid::now_v7(),
            mode = self.mode.label(),
            message_len = request.message.len(),
            has_location = request.user_location.is_some(),
            history = request.conversation_history.len(),
        );

        async {
            let response = match &self.mode {
                AssistantMode::Generative(model) => {
                    self.respond_with_model(model, request).await
                }
                AssistantMode::Keyword => {
                    let intent = Intent::classify(&request.message);
                    info!(%intent, "Classified message");
                    self.handle_intent(intent, request.user_location).await
                }
            };

            info!(
                actions = response.actions.len(),
                has_data = response.data.is_some(),
                "Assistant replied"
            );
            response
        }
        .instrument(span)
        .await
    }
}
