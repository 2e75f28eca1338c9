//! Open Charge Map directory client.
//!
//! The directory returns real station locations but no live occupancy, so availability
//! and pricing are estimated during conversion (see [`convert`]).

use crate::config::OpenChargeMapConfig;
use crate::geo;
use crate::model::{Coordinates, EvCharger};
use crate::providers::ChargerDirectory;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

pub mod convert;

use convert::OcmPoi;

/// HTTP client for the Open Charge Map `poi` endpoint.
pub struct OpenChargeMapClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    country_code: String,
    max_results: u32,
}

impl OpenChargeMapClient {
    pub fn new(api_key: String, config: &OpenChargeMapConfig) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent("arya-mobility/1.0")
            .timeout(config.timeout())
            .build()
            .context("Failed to build Open Charge Map HTTP client")?;

        Ok(Self {
            http_client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            country_code: config.country_code.clone(),
            max_results: config.max_results,
        })
    }

    /// Build from config when an API key is present.
    pub fn from_config(config: &OpenChargeMapConfig) -> Result<Option<Self>> {
        match config.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            Some(key) => Self::new(key.to_string(), config).map(Some),
            None => Ok(None),
        }
    }

    /// Fetch raw POIs around a point.
    pub async fn fetch_pois(&self, at: Coordinates, radius_km: f64) -> Result<Vec<OcmPoi>> {
        let url = format!("{}/poi", self.base_url);
        debug!(
            latitude = at.latitude,
            longitude = at.longitude,
            radius_km,
            "Querying Open Charge Map"
        );

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("key", self.api_key.clone()),
                ("latitude", at.latitude.to_string()),
                ("longitude", at.longitude.to_string()),
                ("distance", radius_km.to_string()),
                ("distanceunit", "KM".to_string()),
                ("countrycode", self.country_code.clone()),
                ("maxresults", self.max_results.to_string()),
                ("verbose", "false".to_string()),
                ("includecomments", "true".to_string()),
            ])
            .send()
            .await
            .context("Failed to send Open Charge Map request")?;

        check_response_status(&response)?;
        response
            .json::<Vec<OcmPoi>>()
            .await
            .context("Failed to parse Open Charge Map response")
    }
}

#[async_trait]
impl ChargerDirectory for OpenChargeMapClient {
    async fn chargers_near(&self, at: Coordinates, radius_km: f64) -> Result<Vec<EvCharger>> {
        let pois = self.fetch_pois(at, radius_km).await?;
        let now = Utc::now();
        let fetched = pois.len();

        let converted: Vec<EvCharger> = pois
            .iter()
            .filter_map(|poi| convert::to_charger(poi, now))
            .collect();
        let chargers = geo::nearest_within(converted, at, radius_km, |charger| {
            charger.location.coordinates()
        });

        info!(fetched, converted = chargers.len(), "Fetched chargers from Open Charge Map");
        Ok(chargers)
    }
}

fn check_response_status(response: &reqwest::Response) -> Result<()> {
    match response.status() {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(anyhow!("Open Charge Map rejected the API key"))
        }
        StatusCode::TOO_MANY_REQUESTS => Err(anyhow!("Open Charge Map rate limit exceeded")),
        s if !s.is_success() => Err(anyhow!("Open Charge Map API error: {}", s)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client_for(server: &Server) -> OpenChargeMapClient {
        let config = OpenChargeMapConfig {
            base_url: server.url(),
            ..OpenChargeMapConfig::default()
        };
        OpenChargeMapClient::new("test-key".to_string(), &config).unwrap()
    }

    #[tokio::test]
    async fn test_chargers_near_converts_and_drops_unlocated() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/poi")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("key".into(), "test-key".into()),
                Matcher::UrlEncoded("countrycode".into(), "AE".into()),
                Matcher::UrlEncoded("distance".into(), "5".into()),
                Matcher::UrlEncoded("distanceunit".into(), "KM".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {
                        "ID": 1,
                        "AddressInfo": {"Title": "City Walk", "Town": "Al Wasl", "Latitude": 25.2, "Longitude": 55.26},
                        "Connections": [{"PowerKW": 22}],
                        "OperatorInfo": {"Title": "DEWA"},
                        "NumberOfPoints": 2
                    },
                    {
                        "ID": 2,
                        "AddressInfo": {"Title": "Nowhere"}
                    }
                ]"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let chargers = client
            .chargers_near(Coordinates::new(25.2048, 55.2708), 5.0)
            .await
            .unwrap();

        assert_eq!(chargers.len(), 1);
        assert_eq!(chargers[0].location.id, "ocm-1");
        assert_eq!(chargers[0].operator, "DEWA");
        assert_eq!(chargers[0].available_sockets, 2);
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/poi")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .chargers_near(Coordinates::new(25.2, 55.27), 5.0)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Open Charge Map API error"));
    }

    #[tokio::test]
    async fn test_unexpected_body_is_an_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/poi")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "bad request"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .chargers_near(Coordinates::new(25.2, 55.27), 5.0)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_from_config_without_key() {
        let config = OpenChargeMapConfig::default();
        assert!(OpenChargeMapClient::from_config(&config).unwrap().is_none());
    }
}
