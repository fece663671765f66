use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use reqwest::Client;

use crate::config::OpenMeteoConfig;
use crate::errors::UpstreamError;
use crate::models::forecast::{Location, WeatherSeries};
use crate::models::open_meteo::{ForecastResponse, GeocodingResponse};

const HOURLY_VARIABLES: &str =
    "temperature_2m,relative_humidity_2m,cloud_cover,shortwave_radiation,wind_speed_10m";

/// Resolves a free-text place name to coordinates.
pub trait LocationResolver: Send + Sync {
    /// `Ok(None)` when the search succeeded but found nothing.
    fn search<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<Option<Location>, UpstreamError>>;
}

/// Supplies the hourly weather series for a coordinate pair.
pub trait WeatherProvider: Send + Sync {
    fn hourly_forecast(&self, latitude: f64, longitude: f64) -> BoxFuture<'_, Result<WeatherSeries, UpstreamError>>;
}

/// Open-Meteo geocoding + forecast client
///
pub struct OpenMeteoClient {
    client: Client,
    forecast_url: String,
    geocoding_url: String,
    forecast_days: u8,
}

impl OpenMeteoClient {

    /// Returns a new instance of OpenMeteoClient
    ///
    /// # Arguments
    ///
    /// * 'config' - endpoints, forecast horizon and request timeout
    pub fn new(config: &OpenMeteoConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_s))
            .build()?;

        Ok(Self {
            client,
            forecast_url: config.forecast_url.clone(),
            geocoding_url: config.geocoding_url.clone(),
            forecast_days: config.forecast_days,
        })
    }

    fn forecast_query(&self, latitude: f64, longitude: f64) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("hourly", HOURLY_VARIABLES.to_string()),
            ("timezone", "auto".to_string()),
            ("forecast_days", self.forecast_days.to_string()),
        ]
    }

    async fn fetch_geocoding(&self, name: &str) -> Result<Option<Location>, UpstreamError> {
        let req = self.client.get(&self.geocoding_url)
            .query(&[("name", name), ("count", "1"), ("language", "en"), ("format", "json")])
            .send().await?;

        let status = req.status();
        if !status.is_success() {
            return Err(UpstreamError(format!("geocoding returned {:?}", status)));
        }

        let json = req.text().await?;
        let resp: GeocodingResponse = serde_json::from_str(&json)?;

        Ok(resp.into_location())
    }

    async fn fetch_hourly(&self, latitude: f64, longitude: f64) -> Result<WeatherSeries, UpstreamError> {
        let req = self.client.get(&self.forecast_url)
            .query(&self.forecast_query(latitude, longitude))
            .send().await?;

        let status = req.status();
        if !status.is_success() {
            return Err(UpstreamError(format!("forecast returned {:?}", status)));
        }

        let json = req.text().await?;
        let resp: ForecastResponse = serde_json::from_str(&json)?;

        resp.hourly.ok_or_else(|| UpstreamError::from("forecast response has no hourly block"))
    }
}

impl LocationResolver for OpenMeteoClient {
    fn search<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<Option<Location>, UpstreamError>> {
        self.fetch_geocoding(name).boxed()
    }
}

impl WeatherProvider for OpenMeteoClient {
    fn hourly_forecast(&self, latitude: f64, longitude: f64) -> BoxFuture<'_, Result<WeatherSeries, UpstreamError>> {
        self.fetch_hourly(latitude, longitude).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_query_parameters() {
        let client = OpenMeteoClient::new(&OpenMeteoConfig::default()).unwrap();
        let query = client.forecast_query(35.6895, 139.6917);

        assert!(query.contains(&("latitude", "35.6895".to_string())));
        assert!(query.contains(&("longitude", "139.6917".to_string())));
        assert!(query.contains(&("timezone", "auto".to_string())));
        assert!(query.contains(&("forecast_days", "3".to_string())));
        assert!(query.contains(&("hourly", HOURLY_VARIABLES.to_string())));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let config = OpenMeteoConfig {
            forecast_url: "http://127.0.0.1:9/v1/forecast".to_string(),
            geocoding_url: "http://127.0.0.1:9/v1/search".to_string(),
            forecast_days: 3,
            timeout_s: 2,
        };
        let client = OpenMeteoClient::new(&config).unwrap();

        assert!(client.hourly_forecast(0.0, 0.0).await.is_err());
        assert!(client.search("Tokyo").await.is_err());
    }
}
