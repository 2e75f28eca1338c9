use super::{Assistant, Intent, ROUTES_PAGE};
use crate::model::{AssistantAction, AssistantResponse, Coordinates, ResponseData};
use crate::providers::{CHARGER_RADIUS_KM, PARKING_RADIUS_KM, TRANSIT_RADIUS_KM, WEEK_DAYS};
use tracing::warn;

const UNNAMED: &str = "unnamed";

/// Chargers and parking zones returned as structured data
const TOP_PLACES: usize = 5;
const TOP_STOPS: usize = 3;
const TOP_EVENTS: usize = 5;

const GENERAL_SUGGESTIONS: [&str; 5] = [
    "Find EV chargers near me",
    "Where can I park?",
    "How do I stay cool?",
    "Show me events today",
    "Best transit route to...",
];

fn unavailable(topic: &str) -> AssistantResponse {
    AssistantResponse::text(format!(
        "I couldn't reach the {} data right now. Please try again in a moment.",
        topic
    ))
}

fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) => format!("{:.2}", p),
        None => "0".to_string(),
    }
}

impl Assistant {
    pub(super) async fn handle_intent(
        &self,
        intent: Intent,
        location: Option<Coordinates>,
    ) -> AssistantResponse {
        match intent {
            Intent::FindChargers => self.charger_reply(location).await,
            Intent::FindParking => self.parking_reply(location).await,
            Intent::HeatSafety => self.heat_reply().await,
            Intent::PlanRoute => route_reply(),
            Intent::FindTransit => self.transit_reply(location).await,
            Intent::Events => self.events_reply().await,
            Intent::General => general_reply(),
        }
    }

    async fn charger_reply(&self, location: Option<Coordinates>) -> AssistantResponse {
        let Some(at) = location else {
            return AssistantResponse::text(
                "To find EV chargers near you, please share your current location. \
                 How many kilometers away are you comfortable traveling?",
            );
        };

        let chargers = match self.chargers.chargers_near(at, CHARGER_RADIUS_KM).await {
            Ok(chargers) => chargers,
            Err(e) => {
                warn!(error = %e, "Charger lookup failed");
                return unavailable("EV charger");
            }
        };

        let available: Vec<_> = chargers
            .into_iter()
            .filter(|c| c.available_sockets > 0)
            .collect();
        let nearest = available.first();

        let message = format!(
            "I found {} available EV chargers within 5km. The closest one is the {} charger \
             with {} available sockets at AED {}/kWh.",
            available.len(),
            nearest.map_or(UNNAMED, |c| c.operator.as_str()),
            nearest.map_or(0, |c| c.available_sockets),
            format_price(nearest.map(|c| c.price)),
        );

        let count = available.len();
        AssistantResponse::text(message).with_data(ResponseData::Chargers {
            chargers: available.into_iter().take(TOP_PLACES).collect(),
            count,
        })
    }

    async fn parking_reply(&self, location: Option<Coordinates>) -> AssistantResponse {
        let Some(at) = location else {
            return AssistantResponse::text(
                "To find parking, please share your location. \
                 Would you prefer cheap rates or close proximity?",
            );
        };

        let zones = match self.data.parking_near(at, PARKING_RADIUS_KM).await {
            Ok(zones) => zones,
            Err(e) => {
                warn!(error = %e, "Parking lookup failed");
                return unavailable("parking");
            }
        };

        let available: Vec<_> = zones.into_iter().filter(|z| z.has_space()).collect();
        let nearest = available.first();

        let message = format!(
            "Found {} available parking zones nearby. The closest is {} parking in {} \
             at AED {}/hour.",
            available.len(),
            nearest.map_or(UNNAMED, |z| z.parking_type.as_str()),
            nearest.map_or(UNNAMED, |z| z.location.district.as_str()),
            format_price(nearest.map(|z| z.hourly_rate)),
        );

        let count = available.len();
        AssistantResponse::text(message).with_data(ResponseData::Parking {
            parking: available.into_iter().take(TOP_PLACES).collect(),
            count,
        })
    }

    async fn heat_reply(&self) -> AssistantResponse {
        let coolest = match self.data.coolest_walking_time().await {
            Ok(coolest) => coolest,
            Err(e) => {
                warn!(error = %e, "Heat lookup failed");
                return unavailable("heat safety");
            }
        };

        let message = format!(
            "For outdoor activities in Dubai, the safest time to go out is between {} \
             when temperatures are around {}. {}",
            coolest.time_window,
            coolest.temperature,
            coolest.recommendations.join(" "),
        );

        let recommendations = coolest.recommendations.clone();
        AssistantResponse::text(message).with_data(ResponseData::Heat {
            coolest_time: coolest,
            recommendations,
        })
    }

    async fn transit_reply(&self, location: Option<Coordinates>) -> AssistantResponse {
        let Some(at) = location else {
            return AssistantResponse::text(
                "Could you share your current location so I can show you nearby transit options?",
            );
        };

        let stops = match self.data.transit_stops_near(at, TRANSIT_RADIUS_KM).await {
            Ok(stops) => stops,
            Err(e) => {
                warn!(error = %e, "Transit lookup failed");
                return unavailable("transit");
            }
        };

        let nearest = stops.first();
        let message = format!(
            "There are {} transit stops within 1km. The nearest has {} routes, \
             with next arrival in {} minutes.",
            stops.len(),
            nearest.map_or(0, |s| s.routes.len()),
            nearest
                .and_then(|s| s.next_arrivals.first())
                .map_or(0, |a| a.arrival_time),
        );

        AssistantResponse::text(message).with_data(ResponseData::Transit {
            stops: stops.into_iter().take(TOP_STOPS).collect(),
        })
    }

    async fn events_reply(&self) -> AssistantResponse {
        let events = match self.data.upcoming_events(WEEK_DAYS).await {
            Ok(events) => events,
            Err(e) => {
                warn!(error = %e, "Events lookup failed");
                return unavailable("events");
            }
        };

        let mut message = format!(
            "There are {} events happening in Dubai this week.",
            events.len()
        );
        if let Some(next) = events.first() {
            message.push_str(&format!(
                " The next major event is {} at {} with an expected crowd of {}K people.",
                next.name,
                next.location.district,
                (f64::from(next.expected_crowd) / 1000.0).round(),
            ));
        }

        let total_events = events.len();
        AssistantResponse::text(message).with_data(ResponseData::Events {
            events: events.into_iter().take(TOP_EVENTS).collect(),
            total_events,
        })
    }
}

/// Route planning needs a destination, which the keyword path never extracts.
fn route_reply() -> AssistantResponse {
    AssistantResponse::text(
        "Route planning requires your destination. Where would you like to go? \
         Also, what's your priority: speed, cost, eco-friendliness, or comfort?",
    )
    .with_action(AssistantAction::navigate(ROUTES_PAGE))
}

fn general_reply() -> AssistantResponse {
    AssistantResponse::text(format!(
        "I'm ARYA, your Dubai mobility assistant. I can help you with {}. \
         What would you like to know?",
        GENERAL_SUGGESTIONS[..3].join(", ")
    ))
}
