// Integration tests for POST /assistant and GET /health

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use arya::api::{create_app, AppServices, GENERIC_ERROR_MESSAGE};
use arya::assistant::{Assistant, AssistantMode};
use arya::config::WeatherConfig;
use arya::model::{
    Coordinates, CoolestWalkingTime, EvCharger, Event, ParkingZone, TransitRoute, TransitStop,
};
use arya::providers::{MobilityData, SimulatedMobility, WeatherClient};
use anyhow::Result;
use async_trait::async_trait;
use chrono::DateTime;
use std::sync::Arc;
use tower::ServiceExt;

fn create_test_app() -> Router {
    let now = DateTime::parse_from_rfc3339("2026-10-15T18:30:00+04:00").unwrap();
    let sim = Arc::new(SimulatedMobility::seeded(7).at_time(now));
    let assistant = Assistant::new(AssistantMode::Keyword, sim.clone(), sim.clone());
    let weather = WeatherClient::new(&WeatherConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        ..WeatherConfig::default()
    })
    .unwrap();

    create_app(AppServices {
        assistant: Arc::new(assistant),
        data: sim,
        weather: Arc::new(weather),
    })
}

/// Data source whose every lookup panics
struct PanickingData;

#[async_trait]
impl MobilityData for PanickingData {
    async fn all_chargers(&self) -> Result<Vec<EvCharger>> {
        panic!("charger catalog blew up")
    }

    async fn parking_zones(&self) -> Result<Vec<ParkingZone>> {
        panic!("parking catalog blew up")
    }

    async fn parking_near(&self, _at: Coordinates, _radius_km: f64) -> Result<Vec<ParkingZone>> {
        panic!("parking lookup blew up")
    }

    async fn transit_routes(&self) -> Result<Vec<TransitRoute>> {
        panic!("transit catalog blew up")
    }

    async fn transit_stops_near(
        &self,
        _at: Coordinates,
        _radius_km: f64,
    ) -> Result<Vec<TransitStop>> {
        panic!("transit lookup blew up")
    }

    async fn upcoming_events(&self, _days_ahead: u32) -> Result<Vec<Event>> {
        panic!("events lookup blew up")
    }

    async fn coolest_walking_time(&self) -> Result<CoolestWalkingTime> {
        panic!("heat lookup blew up")
    }
}

fn create_panicking_app() -> Router {
    let data: Arc<dyn MobilityData> = Arc::new(PanickingData);
    let assistant = Assistant::new(
        AssistantMode::Keyword,
        Arc::new(SimulatedMobility::seeded(7)),
        data.clone(),
    );
    let weather = WeatherClient::new(&WeatherConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        ..WeatherConfig::default()
    })
    .unwrap();

    create_app(AppServices {
        assistant: Arc::new(assistant),
        data,
        weather: Arc::new(weather),
    })
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/assistant")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Charger question with a location returns the count and matching data.
#[tokio::test]
async fn test_charger_question_with_location() {
    let app = create_test_app();

    let response = app
        .oneshot(post_json(
            r#"{"message": "Find EV chargers near me", "userLocation": {"latitude": 25.2048, "longitude": 55.2708}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;

    let count = json["data"]["count"].as_u64().unwrap();
    let message = json["message"].as_str().unwrap();
    let expected_start = format!("I found {} available EV chargers within 5km.", count);
    assert!(message.starts_with(&expected_start));
    assert!(message.contains("AED"));
    assert!(json["data"]["chargers"].as_array().unwrap().len() as u64 <= count.min(5));
    assert_eq!(json["actions"], serde_json::json!([]));
}

/// Greeting falls through to the general reply.
#[tokio::test]
async fn test_greeting_gets_general_reply() {
    let app = create_test_app();

    let response = app
        .oneshot(post_json(r#"{"message": "hello", "conversationHistory": []}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    let message = json["message"].as_str().unwrap();
    assert!(message.starts_with("I'm ARYA, your Dubai mobility assistant."));
    assert!(message.contains("Find EV chargers near me, Where can I park?, How do I stay cool?"));
    assert!(json.get("data").is_none());
    assert_eq!(json["actions"], serde_json::json!([]));
}

/// Missing message behaves like an empty one.
#[tokio::test]
async fn test_empty_body_object_gets_general_reply() {
    let app = create_test_app();

    let response = app.oneshot(post_json("{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert!(json["message"]
        .as_str()
        .unwrap()
        .starts_with("I'm ARYA"));
}

/// Route questions carry a navigate action.
#[tokio::test]
async fn test_route_question_navigates() {
    let app = create_test_app();

    let response = app
        .oneshot(post_json(r#"{"message": "How do I get to the Dubai Mall?"}"#))
        .await
        .unwrap();

    let json = read_json(response).await;
    assert_eq!(
        json["actions"],
        serde_json::json!([{"type": "navigate", "payload": {"page": "/app/routes"}}])
    );
}

/// Evening heat advice uses the 17:00 - 20:00 window.
#[tokio::test]
async fn test_heat_question_uses_clock() {
    let app = create_test_app();

    let response = app
        .oneshot(post_json(r#"{"message": "Is it too hot to walk?"}"#))
        .await
        .unwrap();

    let json = read_json(response).await;
    assert_eq!(json["data"]["coolestTime"]["timeWindow"], "17:00 - 20:00");
    assert_eq!(json["data"]["recommendations"][2], "Peak UV hours have passed");
}

/// Malformed JSON gets the generic failure body.
#[tokio::test]
async fn test_invalid_json_returns_generic_error() {
    let app = create_test_app();

    let response = app.oneshot(post_json("{not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = read_json(response).await;
    assert_eq!(json["message"], GENERIC_ERROR_MESSAGE);
    assert_eq!(json["actions"], serde_json::json!([]));
}

/// A panicking provider yields the generic body and the router keeps serving.
#[tokio::test]
async fn test_handler_panic_returns_generic_error() {
    let app = create_panicking_app();

    let response = app
        .clone()
        .oneshot(post_json(r#"{"message": "is it hot"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = read_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({"message": GENERIC_ERROR_MESSAGE, "actions": []})
    );

    let response = app
        .oneshot(post_json(r#"{"message": "hello"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert!(json["message"].as_str().unwrap().starts_with("I'm ARYA"));
}

/// Health reports the active assistant mode.
#[tokio::test]
async fn test_health_reports_mode() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json, serde_json::json!({"status": "ok", "mode": "keyword"}));
}
