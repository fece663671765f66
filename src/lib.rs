pub mod api_docs;
pub mod config;
pub mod controllers;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;
pub mod shared_state;

use axum::{Router, routing::get, response::Html};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_scalar::Scalar;

use crate::api_docs::ApiDoc;
use crate::routes::forecast_routes::api_routes;
use crate::shared_state::SharedState;

/// Full HTTP application: `/api/*`, the Scalar UI and the static front-end.
pub fn app(shared: SharedState) -> Router {
    let static_dir = shared.config.server.static_dir.clone();

    Router::new()
        .nest("/api", api_routes(shared))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
}
