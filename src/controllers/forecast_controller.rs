use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::config::Config;
use crate::errors::ForecastError;
use crate::models::forecast::{
    EstimateResponse, ForecastReport, HealthStatus, LocationQuery, PanelSystemInfo, SystemConfig,
    WeatherSeries,
};
use crate::services::forecast_service::run_model;
use crate::services::solar_model::{MAX_SUMMARY_DAYS, PANEL_AREA_M2, PANEL_EFFICIENCY, SYSTEM_LOSSES};
use crate::shared_state::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ForecastParams {
    /// Free-text place name; takes precedence over coordinates
    pub city: Option<String>,
    /// Latitude in degrees (−90 … +90)
    pub lat: Option<f64>,
    /// Longitude in degrees (−180 … +180)
    pub lon: Option<f64>,
}

impl ForecastParams {
    pub fn to_query(&self) -> Result<LocationQuery, ForecastError> {
        if let Some(city) = self.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            return Ok(LocationQuery::City(city.to_string()));
        }
        match (self.lat, self.lon) {
            (Some(latitude), Some(longitude)) => Ok(LocationQuery::Coordinates { latitude, longitude }),
            _ => Err(ForecastError::InvalidLocation),
        }
    }
}

impl IntoResponse for ForecastError {
    fn into_response(self) -> Response {
        let status = match self {
            ForecastError::LocationNotFound(_) => StatusCode::NOT_FOUND,
            ForecastError::InvalidLocation => StatusCode::BAD_REQUEST,
            ForecastError::WeatherFetch => StatusCode::BAD_GATEWAY,
        };
        (status, Json(serde_json::json!({"error": self.to_string()}))).into_response()
    }
}

/// GET /api/forecast
/// Solar forecast for a place
///
/// Resolves the location (by `city`, or by `lat` + `lon`), fetches the hourly
/// weather forecast, estimates the hourly output of a 28 m² residential array,
/// summarises the first three days and attaches a generated narrative.
#[utoipa::path(
    get,
    path = "/api/forecast",
    params(ForecastParams),
    responses(
        (status = 200, description = "Forecast with narrative", body = ForecastReport),
        (status = 400, description = "Invalid location parameters"),
        (status = 404, description = "Location not found"),
        (status = 502, description = "Weather provider unavailable")
    )
)]
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(params): Query<ForecastParams>,
) -> Result<Json<ForecastReport>, ForecastError> {
    let query = params.to_query()?;
    let report = state.forecast.forecast(&query).await?;
    Ok(Json(report))
}

/// POST /api/estimate
/// Run the model on a supplied weather series
///
/// Accepts an Open-Meteo style `hourly` block and returns hourly estimates and
/// daily summaries. No network access and no narrative.
#[utoipa::path(
    post,
    path = "/api/estimate",
    request_body = WeatherSeries,
    responses(
        (status = 200, description = "Hourly estimates and daily summaries", body = EstimateResponse)
    )
)]
pub async fn post_estimate(Json(series): Json<WeatherSeries>) -> impl IntoResponse {
    Json(run_model(&series))
}

/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service health", body = HealthStatus)
    )
)]
pub async fn get_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthStatus {
        status: "UP".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        narrative_configured: state.forecast.narrative_configured(),
    })
}

/// GET /api/system/config
/// Model constants and forecast horizon
#[utoipa::path(
    get,
    path = "/api/system/config",
    responses(
        (status = 200, description = "System configuration", body = SystemConfig)
    )
)]
pub async fn get_system_config(State(config): State<Config>) -> impl IntoResponse {
    Json(SystemConfig {
        api_port: config.server.port,
        forecast_days: config.open_meteo.forecast_days,
        max_summary_days: MAX_SUMMARY_DAYS,
        narrative_model: config.narrative.model.clone(),
        panel: PanelSystemInfo {
            panel_area_m2: PANEL_AREA_M2,
            panel_efficiency: PANEL_EFFICIENCY,
            system_losses: SYSTEM_LOSSES,
        },
    })
}
