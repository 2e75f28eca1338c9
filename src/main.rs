use anyhow::{Context, Result};
use arya::api::{create_app, AppServices};
use arya::assistant::{Assistant, AssistantMode};
use arya::config::resolve_config;
use arya::providers::{ChargerDirectory, OpenChargeMapClient, SimulatedMobility, WeatherClient};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arya=info,tower_http=info".into()),
        )
        .init();

    info!("ARYA starting...");

    let config = resolve_config().context("Failed to load configuration")?;

    let simulator = Arc::new(SimulatedMobility::from_config(&config.simulator));
    if let Some(seed) = config.simulator.seed {
        info!(seed = seed, "Simulator running with fixed seed");
    }

    // Real charger locations when Open Charge Map is configured
    let chargers: Arc<dyn ChargerDirectory> =
        match OpenChargeMapClient::from_config(&config.open_charge_map) {
            Ok(Some(client)) => {
                info!("Using Open Charge Map for charger lookups");
                Arc::new(client)
            }
            Ok(None) => {
                info!("No Open Charge Map key configured, using simulated chargers");
                simulator.clone()
            }
            Err(e) => {
                warn!(error = %e, "Open Charge Map unavailable, using simulated chargers");
                simulator.clone()
            }
        };

    let mode = AssistantMode::select(&config.assistant);
    info!(mode = mode.label(), "Assistant mode selected");

    let assistant = Assistant::new(mode, chargers, simulator.clone())
        .with_history_window(config.assistant.history_window);

    let weather =
        WeatherClient::new(&config.weather).context("Failed to initialize weather client")?;

    let app = create_app(AppServices {
        assistant: Arc::new(assistant),
        data: simulator,
        weather: Arc::new(weather),
    });

    let bind_address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    info!(address = %bind_address, "ARYA API listening");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "API server error");
        }
    });

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl_c signal")?;
    info!("Shutdown signal received");

    server_handle.abort();
    info!("ARYA stopped");

    Ok(())
}
