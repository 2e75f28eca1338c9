use super::timestamp;
use crate::model::{Coordinates, HeatRisk, HydrationAdvice};
use crate::providers::simulator::heat;
use crate::providers::WeatherClient;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Downtown Dubai
const DEFAULT_LATITUDE: f64 = 25.2048;
const DEFAULT_LONGITUDE: f64 = 55.2708;

pub struct WeatherAppState {
    pub client: Arc<WeatherClient>,
}

#[derive(Deserialize)]
pub struct WeatherParams {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HeatConditions {
    temperature: f64,
    feels_like: f64,
    risk_level: HeatRisk,
    hydration: HydrationAdvice,
}

#[derive(Serialize)]
struct WeatherResponse {
    success: bool,
    data: HeatConditions,
    timestamp: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    timestamp: String,
}

pub fn create_weather_router(state: WeatherAppState) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .with_state(Arc::new(state))
}

/// GET /weather?latitude=&longitude= - Current heat conditions
async fn get_weather(
    State(state): State<Arc<WeatherAppState>>,
    Query(params): Query<WeatherParams>,
) -> Result<Json<WeatherResponse>, WeatherError> {
    let at = Coordinates::new(
        params.latitude.unwrap_or(DEFAULT_LATITUDE),
        params.longitude.unwrap_or(DEFAULT_LONGITUDE),
    );

    let conditions = state.client.current(at).await.map_err(|e| {
        error!(error = %e, "Weather lookup failed");
        WeatherError::Upstream
    })?;

    Ok(Json(WeatherResponse {
        success: true,
        data: HeatConditions {
            temperature: conditions.temperature,
            feels_like: conditions.feels_like,
            risk_level: HeatRisk::from_feels_like(conditions.feels_like),
            hydration: heat::hydration_advice(conditions.temperature),
        },
        timestamp: timestamp(),
    }))
}

pub(crate) const UPSTREAM_ERROR_MESSAGE: &str = "Failed to fetch weather data";

#[derive(Debug)]
enum WeatherError {
    Upstream,
}

impl IntoResponse for WeatherError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            WeatherError::Upstream => (StatusCode::BAD_GATEWAY, UPSTREAM_ERROR_MESSAGE),
        };

        let body = Json(ErrorResponse {
            success: false,
            error: error_message.to_string(),
            timestamp: timestamp(),
        });

        (status, body).into_response()
    }
}
