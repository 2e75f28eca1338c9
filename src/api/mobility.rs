use super::timestamp;
use crate::providers::{MobilityData, CATALOG_EVENT_DAYS};
use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

pub struct MobilityAppState {
    pub data: Arc<dyn MobilityData>,
}

#[derive(Deserialize)]
pub struct MobilityParams {
    #[serde(rename = "type")]
    pub data_type: Option<String>,
}

#[derive(Serialize)]
struct MobilityResponse {
    success: bool,
    data: Value,
    timestamp: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    timestamp: String,
}

pub fn create_mobility_router(state: MobilityAppState) -> Router {
    Router::new()
        .route("/mobility", get(get_mobility))
        .with_state(Arc::new(state))
}

/// GET /mobility?type=chargers|parking|transit|events - Full simulated catalog
async fn get_mobility(
    State(state): State<Arc<MobilityAppState>>,
    Query(params): Query<MobilityParams>,
) -> Result<Json<MobilityResponse>, MobilityError> {
    let data_type = params.data_type.ok_or(MobilityError::InvalidType)?;

    let data = catalog(state.data.as_ref(), &data_type)
        .await
        .ok_or(MobilityError::InvalidType)?
        .map_err(|e| {
            error!(data_type = %data_type, error = %e, "Failed to fetch mobility data");
            MobilityError::Provider
        })?;

    Ok(Json(MobilityResponse {
        success: true,
        data,
        timestamp: timestamp(),
    }))
}

/// `None` for an unknown type
async fn catalog(data: &dyn MobilityData, data_type: &str) -> Option<Result<Value>> {
    let result = match data_type {
        "chargers" => data.all_chargers().await.and_then(to_value),
        "parking" => data.parking_zones().await.and_then(to_value),
        "transit" => data.transit_routes().await.and_then(to_value),
        "events" => data
            .upcoming_events(CATALOG_EVENT_DAYS)
            .await
            .and_then(to_value),
        _ => return None,
    };
    Some(result)
}

fn to_value<T: Serialize>(records: T) -> Result<Value> {
    Ok(serde_json::to_value(records)?)
}

pub(crate) const PROVIDER_ERROR_MESSAGE: &str = "Failed to fetch mobility data";

#[derive(Debug)]
enum MobilityError {
    InvalidType,
    Provider,
}

impl IntoResponse for MobilityError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            MobilityError::InvalidType => (
                StatusCode::BAD_REQUEST,
                "Invalid data type. Use: chargers, parking, transit, or events",
            ),
            MobilityError::Provider => (StatusCode::INTERNAL_SERVER_ERROR, PROVIDER_ERROR_MESSAGE),
        };

        let body = Json(ErrorResponse {
            success: false,
            error: error_message.to_string(),
            timestamp: timestamp(),
        });

        (status, body).into_response()
    }
}
