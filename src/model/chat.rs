use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::mobility::{Coordinates, CoolestWalkingTime, EvCharger, Event, ParkingZone, TransitStop};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry of the client-held conversation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    /// ISO-8601
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

/// Body of `POST /assistant`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRequest {
    /// Empty or missing falls through to the general intent
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<ChatMessage>,
    #[serde(default)]
    pub user_location: Option<Coordinates>,
}

impl AssistantRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn at(mut self, location: Coordinates) -> Self {
        self.user_location = Some(location);
        self
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.conversation_history = history;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionType {
    Navigate,
    ShowRoute,
    OpenPage,
    Search,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssistantAction {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub payload: Value,
}

impl AssistantAction {
    pub fn navigate(page: &str) -> Self {
        Self {
            action_type: ActionType::Navigate,
            payload: serde_json::json!({ "page": page }),
        }
    }
}

/// Structured payload attached to a reply, one shape per handler.
///
/// Serialized untagged so clients see plain objects such as `{ "chargers": [...], "count": 3 }`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    Chargers {
        chargers: Vec<EvCharger>,
        count: usize,
    },
    Parking {
        parking: Vec<ParkingZone>,
        count: usize,
    },
    Heat {
        #[serde(rename = "coolestTime")]
        coolest_time: CoolestWalkingTime,
        recommendations: Vec<String>,
    },
    Transit {
        stops: Vec<TransitStop>,
    },
    Events {
        events: Vec<Event>,
        #[serde(rename = "totalEvents")]
        total_events: usize,
    },
    /// Best-effort data attached to a generated reply; serializes to `{}` when empty.
    Enrichment(Enrichment),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Enrichment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chargers: Option<Vec<EvCharger>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking: Option<Vec<ParkingZone>>,
}

/// The sole output contract of the assistant pipeline
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssistantResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
    pub actions: Vec<AssistantAction>,
}

impl AssistantResponse {
    /// Plain text reply with no data and no actions
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            actions: Vec::new(),
        }
    }

    pub fn with_data(mut self, data: ResponseData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_action(mut self, action: AssistantAction) -> Self {
        self.actions.push(action);
        self
    }
}
