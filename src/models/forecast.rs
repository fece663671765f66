use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─── Weather input ───────────────────────────────────────────────────────────

/// Hourly weather series as returned in the `hourly` block of Open-Meteo.
///
/// All vectors are index-aligned with `time`. Numeric entries may be `null`
/// or missing entirely; readers substitute defaults instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct WeatherSeries {
    /// ISO-8601 local timestamps, ascending
    #[serde(default)]
    pub time: Vec<String>,
    /// Air temperature at 2 m (°C)
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    /// Relative humidity at 2 m (%)
    #[serde(default)]
    pub relative_humidity_2m: Vec<Option<f64>>,
    /// Total cloud cover (%)
    #[serde(default)]
    pub cloud_cover: Vec<Option<f64>>,
    /// Shortwave radiation (W/m²)
    #[serde(default)]
    pub shortwave_radiation: Vec<Option<f64>>,
    /// Wind speed at 10 m
    #[serde(default)]
    pub wind_speed_10m: Vec<Option<f64>>,
}

impl WeatherSeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn radiation_at(&self, idx: usize) -> f64 {
        value_at(&self.shortwave_radiation, idx, 0.0)
    }

    pub fn cloud_cover_at(&self, idx: usize) -> f64 {
        value_at(&self.cloud_cover, idx, 0.0)
    }

    /// `None` or out of range reads as 20 °C; `Some(0.0)` stays 0 °C.
    pub fn temperature_at(&self, idx: usize) -> f64 {
        value_at(&self.temperature_2m, idx, 20.0)
    }
}

#[inline]
fn value_at(values: &[Option<f64>], idx: usize, default: f64) -> f64 {
    values.get(idx).copied().flatten().unwrap_or(default)
}

// ─── Derived records ─────────────────────────────────────────────────────────

/// Estimated output of the reference PV system for one hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HourlyEstimate {
    /// Timestamp copied verbatim from the weather series
    pub timestamp: String,
    /// Estimated power (kW), rounded to 3 decimals
    pub solar_potential: f64,
    /// Ambient temperature used for the estimate (°C)
    pub temperature: f64,
    /// Cloud cover for the hour (%)
    pub cloud_cover: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailySummary {
    /// Calendar date (YYYY-MM-DD) taken from the hourly timestamps
    pub date: String,
    /// Mean hourly potential (kW)
    pub avg_potential: f64,
    /// Peak hourly potential (kW)
    pub max_potential: f64,
    /// Mean cloud cover, rounded to the nearest percent
    pub avg_cloud_cover: i64,
    /// Number of hourly estimates folded into this day
    pub hour_count: usize,
}

// ─── Location ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// How the caller identified the place to forecast.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates { latitude: f64, longitude: f64 },
}

// ─── REST API response types ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ForecastReport {
    pub location: Location,
    pub generated_at: DateTime<Utc>,
    pub hourly: Vec<HourlyEstimate>,
    pub daily: Vec<DailySummary>,
    /// Markdown narrative, or a fallback message when generation failed
    pub report: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EstimateResponse {
    pub hourly: Vec<HourlyEstimate>,
    pub daily: Vec<DailySummary>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PanelSystemInfo {
    pub panel_area_m2: f64,
    pub panel_efficiency: f64,
    pub system_losses: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SystemConfig {
    pub api_port: u16,
    pub forecast_days: u8,
    pub max_summary_days: usize,
    pub narrative_model: String,
    pub panel: PanelSystemInfo,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub narrative_configured: bool,
}
