use serde::Deserialize;

use crate::errors::ConfigError;

fn default_port() -> u16 { 8080 }
fn default_static_dir() -> String { "static".to_string() }
fn default_forecast_url() -> String { "https://api.open-meteo.com/v1/forecast".to_string() }
fn default_geocoding_url() -> String { "https://geocoding-api.open-meteo.com/v1/search".to_string() }
fn default_forecast_days() -> u8 { 3 }
fn default_timeout_s() -> u64 { 30 }
fn default_model() -> String { "gemini-2.5-flash".to_string() }
fn default_endpoint() -> String { "https://generativelanguage.googleapis.com/v1beta".to_string() }

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub open_meteo: OpenMeteoConfig,
    #[serde(default)]
    pub narrative: NarrativeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the browser front-end, served as fallback
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port(), static_dir: default_static_dir() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenMeteoConfig {
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
    #[serde(default = "default_timeout_s")]
    pub timeout_s: u64,
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_url(),
            geocoding_url: default_geocoding_url(),
            forecast_days: default_forecast_days(),
            timeout_s: default_timeout_s(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NarrativeConfig {
    /// Gemini API key; empty means "not configured"
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_s")]
    pub timeout_s: u64,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_s: default_timeout_s(),
        }
    }
}

impl NarrativeConfig {
    /// The configured key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config = serde_json::from_str(content)?;
        Ok(config)
    }
}
