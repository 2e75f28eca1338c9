//! Open-Meteo current-conditions client.

use crate::config::WeatherConfig;
use crate::model::Coordinates;
use crate::providers::simulator::heat;
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Current temperature readings (°C)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub temperature: f64,
    pub feels_like: f64,
}

#[derive(Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
}

#[derive(Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    #[serde(default)]
    relative_humidity_2m: Option<f64>,
    #[serde(default)]
    apparent_temperature: Option<f64>,
}

impl CurrentBlock {
    /// Reported apparent temperature, else derived from humidity, else the air temperature.
    fn feels_like(&self) -> f64 {
        self.apparent_temperature
            .or_else(|| {
                self.relative_humidity_2m
                    .map(|rh| heat::feels_like(self.temperature_2m, rh))
            })
            .unwrap_or(self.temperature_2m)
    }
}

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature";

pub struct WeatherClient {
    http_client: Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent("arya-mobility/1.0")
            .timeout(config.timeout())
            .build()
            .context("Failed to build weather HTTP client")?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn current(&self, at: Coordinates) -> Result<CurrentConditions> {
        let url = format!("{}/v1/forecast", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("latitude", at.latitude.to_string()),
                ("longitude", at.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
            ])
            .send()
            .await
            .context("Failed to send weather request")?;

        if !response.status().is_success() {
            return Err(anyhow!("Weather API error: {}", response.status()));
        }

        let forecast = response
            .json::<ForecastResponse>()
            .await
            .context("Failed to parse weather response")?;

        Ok(CurrentConditions {
            temperature: forecast.current.temperature_2m,
            feels_like: forecast.current.feels_like(),
        })
    }
}
