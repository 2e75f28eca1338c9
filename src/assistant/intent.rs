use serde::Serialize;
use std::fmt;

/// Category assigned to a user message by the keyword classifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    FindChargers,
    FindParking,
    HeatSafety,
    PlanRoute,
    FindTransit,
    Events,
    General,
}

/// Evaluated top to bottom; the first rule with a matching keyword wins.
const RULES: [(Intent, &[&str]); 6] = [
    (Intent::FindChargers, &["charger", "ev", "charge", "electric"]),
    (Intent::FindParking, &["parking", "park", "spot", "garage"]),
    (
        Intent::HeatSafety,
        &[
            "heat",
            "hot",
            "temperature",
            "sun",
            "walk safely",
            "hydration",
            "water",
        ],
    ),
    (
        Intent::PlanRoute,
        &["route", "directions", "way to", "how do i get", "go to"],
    ),
    (
        Intent::FindTransit,
        &["bus", "metro", "transit", "public transport", "train"],
    ),
    (
        Intent::Events,
        &["event", "concert", "festival", "game", "show"],
    ),
];

impl Intent {
    /// Plain substring matching on the lower-cased message. No stemming or scoring:
    /// "events" contains "ev" and therefore classifies as `FindChargers`.
    pub fn classify(message: &str) -> Intent {
        let lower = message.to_lowercase();
        RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::General)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::FindChargers => "find_chargers",
            Intent::FindParking => "find_parking",
            Intent::HeatSafety => "heat_safety",
            Intent::PlanRoute => "plan_route",
            Intent::FindTransit => "find_transit",
            Intent::Events => "events",
            Intent::General => "general",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
