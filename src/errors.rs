use std::fmt;
use std::fmt::Formatter;

/// Failure talking to an outbound HTTP service (Open-Meteo, Gemini).
#[derive(Debug)]
pub struct UpstreamError(pub String);

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "UpstreamError: {}", self.0)
    }
}
impl std::error::Error for UpstreamError {}

impl From<&str> for UpstreamError {
    fn from(e: &str) -> Self { UpstreamError(e.to_string()) }
}
impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self { UpstreamError(e.to_string()) }
}
impl From<serde_json::Error> for UpstreamError {
    fn from(e: serde_json::Error) -> Self { UpstreamError(e.to_string()) }
}

#[derive(Debug)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigError: {}", self.0)
    }
}
impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self { ConfigError(e.to_string()) }
}
impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self { ConfigError(e.to_string()) }
}

/// User-visible failures of one forecast request.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastError {
    LocationNotFound(String),
    InvalidLocation,
    WeatherFetch,
}

impl fmt::Display for ForecastError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ForecastError::LocationNotFound(city) => write!(f, "Could not find location: {}", city),
            ForecastError::InvalidLocation => write!(f, "Invalid location parameters"),
            ForecastError::WeatherFetch => {
                write!(f, "Failed to fetch weather data from the spirits (API).")
            }
        }
    }
}
impl std::error::Error for ForecastError {}
