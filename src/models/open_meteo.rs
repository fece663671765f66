use serde::Deserialize;

use crate::models::forecast::{Location, WeatherSeries};

// ─── Open-Meteo wire types ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub hourly: Option<WeatherSeries>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeocodingResponse {
    /// First match, if the search returned anything.
    pub fn into_location(self) -> Option<Location> {
        self.results
            .and_then(|results| results.into_iter().next())
            .map(|r| Location {
                name: r.name,
                latitude: r.latitude,
                longitude: r.longitude,
            })
    }
}

// ─── Gemini wire types ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
pub struct Part {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_response_with_nulls() {
        let json = r#"{
            "latitude": 35.7,
            "longitude": 139.7,
            "hourly": {
                "time": ["2024-06-01T00:00", "2024-06-01T01:00"],
                "temperature_2m": [18.5, null],
                "relative_humidity_2m": [80, 82],
                "cloud_cover": [null, 40],
                "shortwave_radiation": [0.0, 12.0],
                "wind_speed_10m": [3.1, 2.9]
            }
        }"#;
        let resp: ForecastResponse = serde_json::from_str(json).unwrap();
        let hourly = resp.hourly.unwrap();
        assert_eq!(hourly.len(), 2);
        assert_eq!(hourly.temperature_at(1), 20.0);
        assert_eq!(hourly.cloud_cover_at(0), 0.0);
        assert_eq!(hourly.radiation_at(1), 12.0);
    }

    #[test]
    fn test_forecast_response_without_hourly() {
        let resp: ForecastResponse = serde_json::from_str(r#"{"error": true, "reason": "bad"}"#).unwrap();
        assert!(resp.hourly.is_none());
    }

    #[test]
    fn test_geocoding_takes_first_result() {
        let json = r#"{"results": [
            {"id": 1, "name": "Tokyo", "latitude": 35.6895, "longitude": 139.69171, "country": "Japan"},
            {"id": 2, "name": "Tokyo Bay", "latitude": 35.5, "longitude": 139.8}
        ]}"#;
        let resp: GeocodingResponse = serde_json::from_str(json).unwrap();
        let loc = resp.into_location().unwrap();
        assert_eq!(loc.name, "Tokyo");
        assert_eq!(loc.latitude, 35.6895);
    }

    #[test]
    fn test_geocoding_no_results() {
        let resp: GeocodingResponse = serde_json::from_str(r#"{"generationtime_ms": 0.5}"#).unwrap();
        assert!(resp.into_location().is_none());
    }

    #[test]
    fn test_generate_content_text() {
        let json = r#"{"candidates": [{"content": {"role": "model", "parts": [{"text": "Sunny "}, {"text": "days."}]}}]}"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.text(), "Sunny days.");

        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.text(), "");
    }
}
