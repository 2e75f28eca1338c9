use super::gemini::{GeminiClient, GenerativeModel};
use crate::config::AssistantConfig;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Which reply path the assistant uses. Resolved once at startup.
#[derive(Clone)]
pub enum AssistantMode {
    Generative(Arc<dyn GenerativeModel>),
    Keyword,
}

impl AssistantMode {
    /// Generative when a real credential is configured and the client builds;
    /// keyword otherwise. Never fails.
    pub fn select(config: &AssistantConfig) -> Self {
        let Some(api_key) = config.usable_api_key() else {
            info!("No Gemini API key configured, using keyword assistant");
            return AssistantMode::Keyword;
        };

        match GeminiClient::new(api_key.to_string(), config) {
            Ok(client) => {
                info!(model = %config.model, "Gemini assistant initialized");
                AssistantMode::Generative(Arc::new(client))
            }
            Err(e) => {
                warn!(error = %e, "Gemini initialization failed, using keyword assistant");
                AssistantMode::Keyword
            }
        }
    }

    pub fn is_generative(&self) -> bool {
        matches!(self, AssistantMode::Generative(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssistantMode::Generative(_) => "generative",
            AssistantMode::Keyword => "keyword",
        }
    }
}

impl fmt::Debug for AssistantMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssistantMode::Generative(model) => {
                f.debug_tuple("Generative").field(&model.name()).finish()
            }
            AssistantMode::Keyword => f.write_str("Keyword"),
        }
    }
}
