use std::sync::Arc;
use std::time::Instant;

use axum::extract::FromRef;

use crate::config::Config;
use crate::services::forecast_service::ForecastService;

#[derive(Clone)]
pub struct AppState {
    /// Location → weather → model → narrative pipeline
    pub forecast: Arc<ForecastService>,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    pub fn new(forecast: ForecastService) -> Self {
        Self {
            forecast: Arc::new(forecast),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Router state. Handlers extract `State<AppState>` and/or `State<Config>`
/// through `FromRef`.
#[derive(Clone)]
pub struct SharedState {
    pub app: AppState,
    pub config: Config,
}

impl FromRef<SharedState> for AppState {
    fn from_ref(shared: &SharedState) -> Self {
        shared.app.clone()
    }
}

impl FromRef<SharedState> for Config {
    fn from_ref(shared: &SharedState) -> Self {
        shared.config.clone()
    }
}
