use std::net::SocketAddr;
use std::sync::Arc;

use log::{error, info, warn};

use solar_forecast::app;
use solar_forecast::config::Config;
use solar_forecast::services::forecast_service::ForecastService;
use solar_forecast::services::narrative_service::GeminiNarrator;
use solar_forecast::services::weather_service::OpenMeteoClient;
use solar_forecast::shared_state::{AppState, SharedState};

/// Key from config, else `API_KEY`, else `GEMINI_API_KEY`.
fn narrative_api_key(config: &Config) -> Option<String> {
    config
        .narrative
        .api_key()
        .map(str::to_string)
        .or_else(|| std::env::var("API_KEY").ok())
        .or_else(|| std::env::var("GEMINI_API_KEY").ok())
        .filter(|k| !k.trim().is_empty())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1. Load configuration
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = match Config::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            warn!("[CONFIG] {} not loaded ({}), using defaults", config_path, e);
            Config::default()
        }
    };
    info!(
        "[CONFIG] Forecast horizon: {} days | narrative model: {}",
        config.open_meteo.forecast_days, config.narrative.model
    );

    // 2. Build collaborators
    let open_meteo = match OpenMeteoClient::new(&config.open_meteo) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Failed to build Open-Meteo client: {}", e);
            return;
        }
    };

    let api_key = narrative_api_key(&config);
    if api_key.is_none() {
        warn!("[NARRATIVE] No API key configured, reports will carry the configuration hint");
    }
    let narrator = match GeminiNarrator::new(&config.narrative, api_key) {
        Ok(n) => Arc::new(n),
        Err(e) => {
            error!("Failed to build narrative client: {}", e);
            return;
        }
    };

    let forecast = ForecastService::new(open_meteo.clone(), open_meteo, narrator);

    // 3. Start Axum HTTP server
    let server_port = config.server.port;
    let shared = SharedState {
        app: AppState::new(forecast),
        config,
    };
    let router = app(shared);

    let addr = SocketAddr::from(([0, 0, 0, 0], server_port));
    info!("API Server listening on http://{}", addr);
    info!("Scalar UI: http://{}/scalar", addr);

    if let Err(e) = axum_server::bind(addr)
        .serve(router.into_make_service())
        .await
    {
        error!("HTTP server error: {}", e);
    }
}
