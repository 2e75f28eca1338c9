// HTTP API: assistant, mobility catalog, weather and health

pub mod assistant;
pub mod health;
pub mod mobility;
pub mod weather;

pub use assistant::{create_assistant_router, AssistantAppState, GENERIC_ERROR_MESSAGE};
pub use health::{create_health_router, HealthAppState};
pub use mobility::{create_mobility_router, MobilityAppState};
pub use weather::{create_weather_router, WeatherAppState};

use crate::assistant::Assistant;
use crate::providers::{MobilityData, WeatherClient};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Router,
};
use chrono::{SecondsFormat, Utc};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

/// Everything the routers need, built once at startup
#[derive(Clone)]
pub struct AppServices {
    pub assistant: Arc<Assistant>,
    pub data: Arc<dyn MobilityData>,
    pub weather: Arc<WeatherClient>,
}

/// Full application router with CORS, request tracing and panic recovery
pub fn create_app(services: AppServices) -> Router {
    let mode = services.assistant.mode().label();

    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    // Each router recovers from panics with its own error body shape
    Router::new()
        .merge(
            create_assistant_router(AssistantAppState {
                assistant: services.assistant,
            })
            .layer(CatchPanicLayer::custom(assistant_panic_response)),
        )
        .merge(
            create_mobility_router(MobilityAppState {
                data: services.data,
            })
            .layer(CatchPanicLayer::custom(status_panic_response(
                mobility::PROVIDER_ERROR_MESSAGE,
            ))),
        )
        .merge(
            create_weather_router(WeatherAppState {
                client: services.weather,
            })
            .layer(CatchPanicLayer::custom(status_panic_response(
                weather::UPSTREAM_ERROR_MESSAGE,
            ))),
        )
        .merge(create_health_router(HealthAppState { mode }))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(assistant_panic_response))
        .layer(cors)
}

/// ISO-8601 UTC timestamp with millisecond precision
pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn log_panic(panic: &(dyn Any + Send + 'static)) {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    error!(panic = %detail, "Request handler panicked");
}

fn assistant_panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    log_panic(panic.as_ref());

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "message": GENERIC_ERROR_MESSAGE,
            "actions": [],
        })),
    )
        .into_response()
}

/// Panic body for the `{success, error, timestamp}` endpoints
fn status_panic_response(
    message: &'static str,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone + Send + Sync + 'static {
    move |panic: Box<dyn Any + Send + 'static>| {
        log_panic(panic.as_ref());

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "success": false,
                "error": message,
                "timestamp": timestamp(),
            })),
        )
            .into_response()
    }
}
