use axum::{routing::{get, post}, Router};
use crate::controllers::forecast_controller::{
    // Forecast pipeline
    get_forecast, post_estimate,
    // Service info
    get_health, get_system_config,
};
use crate::shared_state::SharedState;

/// Build the `/api/*` sub-router.
/// Handlers extract `State<AppState>` and/or `State<Config>` via
/// `FromRef<SharedState>`; a single `.with_state(shared)` covers both.
pub fn api_routes(shared: SharedState) -> Router {
    Router::new()
        .route("/forecast",       get(get_forecast))
        .route("/estimate",       post(post_estimate))
        .route("/health",         get(get_health))
        .route("/system/config",  get(get_system_config))
        .with_state(shared)
}
