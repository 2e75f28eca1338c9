use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Placeholder credential from the sample config; treated as "not configured".
pub const PLACEHOLDER_API_KEY: &str = "your-gemini-api-key";

/// Complete ARYA configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AryaConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub open_charge_map: OpenChargeMapConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Generative model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Gemini API key. None (or the placeholder) selects the keyword path.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Number of trailing history messages quoted in the prompt
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout_seconds() -> u64 {
    12
}

fn default_history_window() -> usize {
    4
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_gemini_base_url(),
            timeout_seconds: default_timeout_seconds(),
            history_window: default_history_window(),
        }
    }
}

impl AssistantConfig {
    /// Returns the API key only when it is set to something other than the placeholder.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Open Charge Map directory configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OpenChargeMapConfig {
    /// When unset, charger queries are answered by the simulator.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_ocm_base_url")]
    pub base_url: String,
    #[serde(default = "default_country_code")]
    pub country_code: String,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_ocm_base_url() -> String {
    "https://api.openchargemap.io/v3".to_string()
}

fn default_country_code() -> String {
    "AE".to_string()
}

fn default_max_results() -> u32 {
    50
}

impl Default for OpenChargeMapConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_ocm_base_url(),
            country_code: default_country_code(),
            max_results: default_max_results(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl OpenChargeMapConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Open-Meteo configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Synthetic data configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatorConfig {
    /// Fixed seed: every call regenerates the same records. None = fresh entropy per call.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_charger_count")]
    pub charger_count: usize,
    #[serde(default = "default_parking_count")]
    pub parking_count: usize,
}

fn default_charger_count() -> usize {
    45
}

fn default_parking_count() -> usize {
    30
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            charger_count: default_charger_count(),
            parking_count: default_parking_count(),
        }
    }
}

impl AryaConfig {
    /// Apply environment overrides on top of file/default values.
    ///
    /// Unparseable numeric values are ignored.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("GEMINI_API_KEY") {
            self.assistant.api_key = Some(v);
        }
        if let Some(v) = lookup("OCM_API_KEY") {
            self.open_charge_map.api_key = Some(v);
        }
        if let Some(v) = lookup("ARYA_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("ARYA_PORT") {
            if let Ok(port) = v.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Some(v) = lookup("ARYA_SIMULATOR_SEED") {
            if let Ok(seed) = v.parse::<u64>() {
                self.simulator.seed = Some(seed);
            }
        }
    }
}

/// Load configuration from TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<AryaConfig> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: AryaConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

/// Resolve configuration the way the binary does: `ARYA_CONFIG`, then `./arya.toml`,
/// then defaults, with environment overrides applied last.
pub fn resolve_config() -> Result<AryaConfig> {
    let mut config = match std::env::var("ARYA_CONFIG") {
        Ok(path) => load_config(path)?,
        Err(_) if Path::new("arya.toml").exists() => load_config("arya.toml")?,
        Err(_) => AryaConfig::default(),
    };
    config.apply_env();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AryaConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.assistant.model, "gemini-2.5-flash");
        assert_eq!(config.assistant.history_window, 4);
        assert_eq!(config.open_charge_map.country_code, "AE");
        assert_eq!(config.open_charge_map.max_results, 50);
        assert_eq!(config.simulator.charger_count, 45);
        assert!(config.assistant.api_key.is_none());
        assert!(config.simulator.seed.is_none());
    }

    #[test]
    fn test_config_deserialization() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [assistant]
            api_key = "abc123"
            model = "gemini-pro"
            timeout_seconds = 15

            [open_charge_map]
            api_key = "ocm-key"
            country_code = "SA"

            [simulator]
            seed = 7
            parking_count = 10
        "#;

        let config: AryaConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.assistant.usable_api_key(), Some("abc123"));
        assert_eq!(config.assistant.model, "gemini-pro");
        assert_eq!(config.assistant.timeout(), Duration::from_secs(15));
        assert_eq!(config.open_charge_map.api_key.as_deref(), Some("ocm-key"));
        assert_eq!(config.open_charge_map.country_code, "SA");
        assert_eq!(config.simulator.seed, Some(7));
        assert_eq!(config.simulator.parking_count, 10);
    }

    #[test]
    fn test_partial_config() {
        // Missing sections use defaults
        let toml = r#"
            [weather]
            timeout_seconds = 3
        "#;

        let config: AryaConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.weather.timeout_seconds, 3);
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.simulator.charger_count, 45);
    }

    #[test]
    fn test_placeholder_key_is_not_usable() {
        let mut assistant = AssistantConfig::default();
        assert_eq!(assistant.usable_api_key(), None);

        assistant.api_key = Some(PLACEHOLDER_API_KEY.to_string());
        assert_eq!(assistant.usable_api_key(), None);

        assistant.api_key = Some("   ".to_string());
        assert_eq!(assistant.usable_api_key(), None);

        assistant.api_key = Some("real-key".to_string());
        assert_eq!(assistant.usable_api_key(), Some("real-key"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("GEMINI_API_KEY", "from-env"),
            ("ARYA_PORT", "9090"),
            ("ARYA_SIMULATOR_SEED", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = AryaConfig::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.assistant.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.server.port, 9090);
        // Unparseable seed is ignored
        assert!(config.simulator.seed.is_none());
        assert!(config.open_charge_map.api_key.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 4000").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/arya.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
