use std::sync::Arc;

use chrono::Utc;

use crate::errors::ForecastError;
use crate::models::forecast::{EstimateResponse, ForecastReport, Location, LocationQuery, WeatherSeries};
use crate::services::narrative_service::NarrativeGenerator;
use crate::services::solar_model;
use crate::services::weather_service::{LocationResolver, WeatherProvider};

/// Runs the pure model over a weather series: hourly estimates plus daily summaries.
pub fn run_model(series: &WeatherSeries) -> EstimateResponse {
    let hourly = solar_model::estimate_hourly(series);
    let daily = solar_model::aggregate_daily(&hourly);
    EstimateResponse { hourly, daily }
}

fn valid_coordinates(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
}

/// Orchestrates one forecast: location → weather → model → narrative.
pub struct ForecastService {
    resolver: Arc<dyn LocationResolver>,
    weather: Arc<dyn WeatherProvider>,
    narrator: Arc<dyn NarrativeGenerator>,
}

impl ForecastService {
    pub fn new(
        resolver: Arc<dyn LocationResolver>,
        weather: Arc<dyn WeatherProvider>,
        narrator: Arc<dyn NarrativeGenerator>,
    ) -> Self {
        Self { resolver, weather, narrator }
    }

    pub fn narrative_configured(&self) -> bool {
        self.narrator.is_configured()
    }

    pub async fn resolve_location(&self, query: &LocationQuery) -> Result<Location, ForecastError> {
        match query {
            LocationQuery::City(city) => match self.resolver.search(city).await {
                Ok(Some(location)) => Ok(location),
                Ok(None) => Err(ForecastError::LocationNotFound(city.clone())),
                Err(e) => {
                    log::warn!("[FORECAST] Geocoding '{}' failed: {}", city, e);
                    Err(ForecastError::LocationNotFound(city.clone()))
                }
            },
            LocationQuery::Coordinates { latitude, longitude } => {
                if !valid_coordinates(*latitude, *longitude) {
                    return Err(ForecastError::InvalidLocation);
                }
                Ok(Location {
                    name: format!(
                        "{:.2}, {:.2}",
                        solar_model::round_to(*latitude, 2),
                        solar_model::round_to(*longitude, 2)
                    ),
                    latitude: *latitude,
                    longitude: *longitude,
                })
            }
        }
    }

    pub async fn forecast(&self, query: &LocationQuery) -> Result<ForecastReport, ForecastError> {
        let location = self.resolve_location(query).await?;

        let series = self
            .weather
            .hourly_forecast(location.latitude, location.longitude)
            .await
            .map_err(|e| {
                log::error!("[WEATHER] Fetch for {} failed: {}", location.name, e);
                ForecastError::WeatherFetch
            })?;

        let EstimateResponse { hourly, daily } = run_model(&series);
        log::info!(
            "[FORECAST] {} ({:.4}, {:.4}) | {} hours | {} days",
            location.name, location.latitude, location.longitude, hourly.len(), daily.len()
        );

        let report = self.narrator.generate(&location, &daily).await;

        Ok(ForecastReport {
            location,
            generated_at: Utc::now(),
            hourly,
            daily,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::UpstreamError;
    use crate::models::forecast::DailySummary;
    use futures_util::FutureExt;
    use futures_util::future::BoxFuture;
    use std::sync::Mutex;

    struct FakeResolver(Result<Option<Location>, String>);

    impl LocationResolver for FakeResolver {
        fn search<'a>(&'a self, _name: &'a str) -> BoxFuture<'a, Result<Option<Location>, UpstreamError>> {
            let result = self.0.clone().map_err(UpstreamError);
            async move { result }.boxed()
        }
    }

    struct FakeWeather {
        series: Option<WeatherSeries>,
        calls: Mutex<Vec<(f64, f64)>>,
    }

    impl WeatherProvider for FakeWeather {
        fn hourly_forecast(&self, latitude: f64, longitude: f64) -> BoxFuture<'_, Result<WeatherSeries, UpstreamError>> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push((latitude, longitude));
            }
            let result = self.series.clone().ok_or_else(|| UpstreamError::from("offline"));
            async move { result }.boxed()
        }
    }

    struct FakeNarrator;

    impl NarrativeGenerator for FakeNarrator {
        fn generate<'a>(&'a self, location: &'a Location, daily: &'a [DailySummary]) -> BoxFuture<'a, String> {
            async move { format!("{}: {} days", location.name, daily.len()) }.boxed()
        }

        fn is_configured(&self) -> bool {
            true
        }
    }

    fn sample_series() -> WeatherSeries {
        WeatherSeries {
            time: vec![
                "2024-06-01T11:00".into(),
                "2024-06-01T12:00".into(),
                "2024-06-02T12:00".into(),
            ],
            shortwave_radiation: vec![Some(500.0), Some(1000.0), Some(0.0)],
            temperature_2m: vec![Some(45.0), Some(25.0), Some(10.0)],
            cloud_cover: vec![Some(10.0), Some(30.0), Some(100.0)],
            ..Default::default()
        }
    }

    fn service(resolver: FakeResolver, series: Option<WeatherSeries>) -> (ForecastService, Arc<FakeWeather>) {
        let weather = Arc::new(FakeWeather { series, calls: Mutex::new(Vec::new()) });
        let svc = ForecastService::new(Arc::new(resolver), weather.clone(), Arc::new(FakeNarrator));
        (svc, weather)
    }

    fn kyoto() -> Location {
        Location { name: "Kyoto".to_string(), latitude: 35.02, longitude: 135.75 }
    }

    #[tokio::test]
    async fn test_city_forecast_end_to_end() {
        let (svc, weather) = service(FakeResolver(Ok(Some(kyoto()))), Some(sample_series()));
        let report = svc.forecast(&LocationQuery::City("Kyoto".into())).await.unwrap();

        assert_eq!(report.location, kyoto());
        assert_eq!(report.hourly.len(), 3);
        assert_eq!(report.daily.len(), 2);
        assert_eq!(report.daily[0].date, "2024-06-01");
        assert_eq!(report.daily[0].max_potential, 4.284);
        assert_eq!(report.daily[0].avg_cloud_cover, 20);
        assert_eq!(report.report, "Kyoto: 2 days");
        assert_eq!(weather.calls.lock().unwrap().as_slice(), &[(35.02, 135.75)]);
    }

    #[tokio::test]
    async fn test_coordinates_get_synthesized_name() {
        let (svc, _) = service(FakeResolver(Ok(None)), Some(sample_series()));
        let query = LocationQuery::Coordinates { latitude: 35.6895, longitude: 139.6917 };
        let report = svc.forecast(&query).await.unwrap();
        assert_eq!(report.location.name, "35.69, 139.69");
        assert_eq!(report.location.latitude, 35.6895);
    }

    #[tokio::test]
    async fn test_coordinate_name_rounds_midpoints_up() {
        let (svc, _) = service(FakeResolver(Ok(None)), Some(sample_series()));
        let query = LocationQuery::Coordinates { latitude: 0.125, longitude: -0.125 };
        let location = svc.resolve_location(&query).await.unwrap();
        assert_eq!(location.name, "0.13, -0.13");
        assert_eq!(location.latitude, 0.125);
    }

    #[tokio::test]
    async fn test_unknown_city() {
        let (svc, weather) = service(FakeResolver(Ok(None)), Some(sample_series()));
        let err = svc.forecast(&LocationQuery::City("Koriko".into())).await.unwrap_err();
        assert_eq!(err, ForecastError::LocationNotFound("Koriko".into()));
        assert_eq!(err.to_string(), "Could not find location: Koriko");
        assert!(weather.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_geocoding_failure_reads_as_not_found() {
        let (svc, _) = service(FakeResolver(Err("timeout".into())), Some(sample_series()));
        let err = svc.forecast(&LocationQuery::City("Tokyo".into())).await.unwrap_err();
        assert_eq!(err, ForecastError::LocationNotFound("Tokyo".into()));
    }

    #[tokio::test]
    async fn test_out_of_range_coordinates() {
        let (svc, _) = service(FakeResolver(Ok(None)), Some(sample_series()));
        for (lat, lon) in [(91.0, 0.0), (0.0, -180.5), (f64::NAN, 0.0)] {
            let query = LocationQuery::Coordinates { latitude: lat, longitude: lon };
            assert_eq!(svc.forecast(&query).await.unwrap_err(), ForecastError::InvalidLocation);
        }
    }

    #[tokio::test]
    async fn test_weather_failure() {
        let (svc, _) = service(FakeResolver(Ok(Some(kyoto()))), None);
        let err = svc.forecast(&LocationQuery::City("Kyoto".into())).await.unwrap_err();
        assert_eq!(err, ForecastError::WeatherFetch);
        assert_eq!(err.to_string(), "Failed to fetch weather data from the spirits (API).");
    }

    #[test]
    fn test_run_model_matches_components() {
        let series = sample_series();
        let out = run_model(&series);
        assert_eq!(out.hourly, solar_model::estimate_hourly(&series));
        assert_eq!(out.daily, solar_model::aggregate_daily(&out.hourly));
        assert_eq!(out.hourly[0].solar_potential, 1.928);
    }
}
