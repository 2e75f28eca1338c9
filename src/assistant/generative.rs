use super::gemini::{GenerativeModel, ModelNotFound};
use super::{Assistant, ROUTES_PAGE};
use crate::model::{
    AssistantAction, AssistantRequest, AssistantResponse, ChatMessage, ChatRole, Coordinates,
    Enrichment, ResponseData,
};
use crate::providers::{CHARGER_RADIUS_KM, PARKING_RADIUS_KM, TRANSIT_RADIUS_KM, WEEK_DAYS};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const SYSTEM_PROMPT: &str = "You are ARYA, a professional AI-powered mobility assistant for Dubai. Your role is to provide expert navigation and transportation guidance with precision and clarity.

Key capabilities:
1. Plan multi-modal routes (bus, metro, EV, scooter, walking)
2. Predict EV charger availability and pricing
3. Find parking solutions with real-time availability
4. Provide heat safety recommendations based on current conditions
5. Advise on events and crowd impacts on mobility
6. Optimize for user preferences (fastest, cheapest, eco-friendly, coolest)

Response style:
- Be concise and professional - provide essential information efficiently
- Structure responses with clear bullet points or numbered lists
- Focus on actionable recommendations with specific data
- Include safety considerations when relevant
- Maintain a knowledgeable, expert tone

Always prioritize:
- User safety, especially in extreme heat
- Accurate, real-time information
- Personalized recommendations based on context
- Clear, step-by-step guidance

Remember:
- Dubai uses AED currency
- Temperatures can exceed 50°C in summer - mention heat safety when appropriate
- Metro Red and Green lines are the main transit backbone
- Multiple ride-sharing options available (Uber, Careem, Tier scooters, Lime)
- Weekend is Friday-Saturday, Sunday is a workday

When responding:
1. Provide direct, concise answers to the user's query
2. Include specific data points (times, costs, availability numbers)
3. Structure information clearly with bullet points when multiple options exist
4. Mention safety considerations briefly when relevant
5. Offer 2-3 alternatives maximum to avoid overwhelming the user";

pub const APOLOGY_MESSAGE: &str = "I'm having trouble processing your request right now. \
Please try asking in a different way, or let me know if you need help with something \
specific like finding EV chargers, parking, or planning a route.";

const ENRICHMENT_LIMIT: usize = 5;

impl Assistant {
    pub(super) async fn respond_with_model(
        &self,
        model: &Arc<dyn GenerativeModel>,
        request: &AssistantRequest,
    ) -> AssistantResponse {
        let context = self.mobility_context(request.user_location).await;
        let prompt = build_prompt(request, &context, self.history_window);

        info!(model = model.name(), prompt_len = prompt.len(), "Sending prompt to model");
        let text = match model.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                error!(model = model.name(), error = %e, "Model call failed");
                if e.downcast_ref::<ModelNotFound>().is_some() {
                    // Diagnostic only; the apology does not wait for it
                    tokio::spawn(log_available_models(Arc::clone(model)));
                }
                return AssistantResponse::text(APOLOGY_MESSAGE)
                    .with_data(ResponseData::Enrichment(Enrichment::default()));
            }
        };

        let (enrichment, actions) = self.enrich(&text, request.user_location).await;
        AssistantResponse {
            message: text,
            data: Some(ResponseData::Enrichment(enrichment)),
            actions,
        }
    }

    /// Summarise provider data for the prompt. A provider that fails is left out.
    pub(super) async fn mobility_context(&self, location: Option<Coordinates>) -> String {
        let mut lines: Vec<String> = Vec::new();

        if let Some(at) = location {
            let (chargers, parking, stops) = futures::join!(
                self.chargers.chargers_near(at, CHARGER_RADIUS_KM),
                self.data.parking_near(at, PARKING_RADIUS_KM),
                self.data.transit_stops_near(at, TRANSIT_RADIUS_KM),
            );

            lines.push("NEARBY DATA:".to_string());

            match chargers {
                Ok(chargers) => {
                    let available: Vec<_> =
                        chargers.iter().filter(|c| c.available_sockets > 0).collect();
                    lines.push(format!(
                        "EV Chargers within 5km: {} available",
                        available.len()
                    ));
                    if let Some(c) = available.first() {
                        lines.push(format!(
                            "Closest charger: {} ({}/{} available) at AED {:.2}/kWh",
                            c.operator, c.available_sockets, c.total_sockets, c.price
                        ));
                    }
                }
                Err(e) => warn!(error = %e, "Charger context unavailable"),
            }

            match parking {
                Ok(zones) => {
                    let available: Vec<_> = zones.iter().filter(|z| z.has_space()).collect();
                    lines.push(format!(
                        "Parking within 2km: {} zones with availability",
                        available.len()
                    ));
                    if let Some(z) = available.first() {
                        lines.push(format!(
                            "Closest parking: {} ({}/{} available) at AED {}/hour",
                            z.location.district,
                            z.free_spaces(),
                            z.capacity,
                            z.hourly_rate
                        ));
                    }
                }
                Err(e) => warn!(error = %e, "Parking context unavailable"),
            }

            match stops {
                Ok(stops) => {
                    lines.push(format!("Transit stops within 1km: {}", stops.len()));
                    if let Some(s) = stops.first() {
                        lines.push(format!(
                            "Nearest stop: {} with {} routes",
                            s.location.district,
                            s.routes.len()
                        ));
                    }
                }
                Err(e) => warn!(error = %e, "Transit context unavailable"),
            }
        }

        lines.push("\nCURRENT CONDITIONS:".to_string());

        let (coolest, events) = futures::join!(
            self.data.coolest_walking_time(),
            self.data.upcoming_events(WEEK_DAYS),
        );
        match coolest {
            Ok(c) => lines.push(format!(
                "Safest outdoor time: {} ({})",
                c.time_window, c.temperature
            )),
            Err(e) => warn!(error = %e, "Heat context unavailable"),
        }
        match events {
            Ok(events) => lines.push(format!("Upcoming events this week: {}", events.len())),
            Err(e) => warn!(error = %e, "Events context unavailable"),
        }

        lines.join("\n")
    }

    /// Attach structured data the reply talks about. Each lookup fails on its own.
    pub(super) async fn enrich(
        &self,
        text: &str,
        location: Option<Coordinates>,
    ) -> (Enrichment, Vec<AssistantAction>) {
        let lower = text.to_lowercase();
        let mut enrichment = Enrichment::default();
        let mut actions = Vec::new();

        if let Some(at) = location {
            let wants_chargers = lower.contains("charger") || lower.contains("ev");
            let wants_parking = lower.contains("parking");

            let (chargers, parking) = futures::join!(
                async {
                    if wants_chargers {
                        Some(self.chargers.chargers_near(at, CHARGER_RADIUS_KM).await)
                    } else {
                        None
                    }
                },
                async {
                    if wants_parking {
                        Some(self.data.parking_near(at, PARKING_RADIUS_KM).await)
                    } else {
                        None
                    }
                },
            );

            match chargers {
                Some(Ok(chargers)) => {
                    enrichment.chargers =
                        Some(chargers.into_iter().take(ENRICHMENT_LIMIT).collect())
                }
                Some(Err(e)) => warn!(error = %e, "Charger enrichment skipped"),
                None => {}
            }

            match parking {
                Some(Ok(zones)) => {
                    enrichment.parking = Some(zones.into_iter().take(ENRICHMENT_LIMIT).collect())
                }
                Some(Err(e)) => warn!(error = %e, "Parking enrichment skipped"),
                None => {}
            }
        }

        if lower.contains("route") || lower.contains("direction") {
            actions.push(AssistantAction::navigate(ROUTES_PAGE));
        }

        (enrichment, actions)
    }
}

async fn log_available_models(model: Arc<dyn GenerativeModel>) {
    match model.list_models().await {
        Ok(models) => info!(?models, "Available models"),
        Err(e) => error!(error = %e, "Failed to list available models"),
    }
}

fn format_history(history: &[ChatMessage], window: usize) -> String {
    if history.len() <= 1 {
        return "This is the start of our conversation.".to_string();
    }

    let start = history.len().saturating_sub(window);
    let turns: Vec<String> = history[start..]
        .iter()
        .map(|msg| {
            let speaker = match msg.role {
                ChatRole::User => "User",
                ChatRole::Assistant => "ARYA",
            };
            format!("{}: {}", speaker, msg.content)
        })
        .collect();

    format!("Previous conversation:\n{}", turns.join("\n"))
}

fn location_sentence(location: Option<Coordinates>) -> String {
    match location {
        Some(at) => format!(
            "User is currently at approximately {}, {} in Dubai.",
            at.latitude, at.longitude
        ),
        None => "User location not provided.".to_string(),
    }
}

pub(super) fn build_prompt(
    request: &AssistantRequest,
    context: &str,
    history_window: usize,
) -> String {
    format!(
        "{system}\n\n{location}\n\n{history}\n\nCurrent Dubai mobility data:\n{context}\n\n\
         User's latest message: \"{message}\"\n\n\
         Please respond naturally and conversationally as ARYA. Be helpful, specific, and \
         provide actionable advice based on the current data. If you need more information \
         to give the best recommendation, ask follow-up questions.",
        system = SYSTEM_PROMPT,
        location = location_sentence(request.user_location),
        history = format_history(&request.conversation_history, history_window),
        context = context,
        message = request.message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(role: ChatRole, content: &str) -> ChatMessage {
        ChatMessage {
            id: content.to_string(),
            role,
            content: content.to_string(),
            timestamp: "2026-10-15T08:00:00Z".to_string(),
            context: None,
        }
    }

    #[test]
    fn test_single_message_history_is_conversation_start() {
        let history = vec![message(ChatRole::User, "hi")];
        assert_eq!(
            format_history(&history, 4),
            "This is the start of our conversation."
        );
        assert_eq!(format_history(&[], 4), "This is the start of our conversation.");
    }

    #[test]
    fn test_history_keeps_last_four_labeled() {
        let history: Vec<ChatMessage> = (1..=6)
            .map(|i| {
                let role = if i % 2 == 1 { ChatRole::User } else { ChatRole::Assistant };
                message(role, &format!("m{}", i))
            })
            .collect();

        let formatted = format_history(&history, 4);
        assert_eq!(
            formatted,
            "Previous conversation:\nUser: m3\nARYA: m4\nUser: m5\nARYA: m6"
        );
        assert!(!formatted.contains("m2"));
    }

    #[test]
    fn test_prompt_contains_all_sections() {
        let request = AssistantRequest::new("Where can I charge?")
            .at(Coordinates::new(25.2048, 55.2708));
        let context = "NEARBY DATA:\nEV Chargers within 5km: 2 available";
        let prompt = build_prompt(&request, context, 4);

        assert!(prompt.starts_with("You are ARYA"));
        assert!(prompt.contains("User is currently at approximately 25.2048, 55.2708 in Dubai."));
        assert!(prompt.contains("This is the start of our conversation."));
        assert!(prompt.contains("Current Dubai mobility data:\nNEARBY DATA:"));
        assert!(prompt.contains("User's latest message: \"Where can I charge?\""));
    }

    #[test]
    fn test_prompt_without_location() {
        let prompt = build_prompt(&AssistantRequest::new("hi"), "", 4);
        assert!(prompt.contains("User location not provided."));
    }
}
