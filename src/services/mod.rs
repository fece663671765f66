pub mod forecast_service;
pub mod narrative_service;
pub mod solar_model;
pub mod weather_service;
