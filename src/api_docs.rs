use utoipa::OpenApi;
use crate::controllers::forecast_controller;
use crate::models::forecast;

#[derive(OpenApi)]
#[openapi(
    paths(
        forecast_controller::get_forecast,
        forecast_controller::post_estimate,
        forecast_controller::get_health,
        forecast_controller::get_system_config
    ),
    components(
        schemas(
            forecast::WeatherSeries,
            forecast::HourlyEstimate,
            forecast::DailySummary,
            forecast::Location,
            forecast::ForecastReport,
            forecast::EstimateResponse,
            forecast::HealthStatus,
            forecast::SystemConfig,
            forecast::PanelSystemInfo
        )
    ),
    tags(
        (name = "solar-forecast", description = "Solar Potential Forecast API")
    )
)]
pub struct ApiDoc;
