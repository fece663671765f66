//! Narrative generation
//!
//! Turns the daily summaries into a short markdown story through the Gemini
//! `generateContent` endpoint. Generation never fails the request: every
//! problem degrades to a fixed fallback message.

use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use reqwest::Client;

use crate::config::NarrativeConfig;
use crate::errors::UpstreamError;
use crate::models::forecast::{DailySummary, Location};
use crate::models::open_meteo::GenerateContentResponse;
use crate::services::solar_model::MAX_SUMMARY_DAYS;

pub const MISSING_KEY_MESSAGE: &str = "Please configure your API Key to receive the Spirit's report.";
pub const EMPTY_REPLY_MESSAGE: &str = "The spirits are silent today...";
pub const ERROR_MESSAGE: &str = "The wind spirits interfered with the message (Error fetching report).";

pub trait NarrativeGenerator: Send + Sync {
    fn generate<'a>(&'a self, location: &'a Location, daily: &'a [DailySummary]) -> BoxFuture<'a, String>;

    fn is_configured(&self) -> bool;
}

/// One human-readable line per day.
pub fn summary_lines(daily: &[DailySummary]) -> String {
    daily
        .iter()
        .map(|d| {
            format!(
                "Date: {}, Max Potential: {}kW, Avg Cloud Cover: {}%",
                d.date, d.max_potential, d.avg_cloud_cover
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_prompt(location: &Location, daily: &[DailySummary]) -> String {
    format!(
        "You are a Reporting Agent with the soul of a Studio Ghibli storyteller.\n\
         The user is asking for a solar power forecast for: {}.\n\
         \n\
         Here is the data for the next {} days:\n\
         {}\n\
         \n\
         Write a short, whimsical, and comforting report (approx 100-150 words).\n\
         Use metaphors related to nature, wind, spirits, sun, and clouds.\n\
         Explain if it's a good time for solar energy, but do it gently.\n\
         If it's cloudy, describe the clouds as fluffy friends or mysterious blankets.\n\
         If it's sunny, describe the sun's warm embrace.\n\
         \n\
         Format the response in Markdown.\n",
        location.name,
        MAX_SUMMARY_DAYS,
        summary_lines(daily)
    )
}

/// Only an empty reply is replaced; whitespace is passed through as-is.
fn reply_or_fallback(text: String) -> String {
    if text.is_empty() { EMPTY_REPLY_MESSAGE.to_string() } else { text }
}

pub struct GeminiNarrator {
    client: Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl GeminiNarrator {
    /// `api_key` is passed explicitly; `None` leaves the narrator unconfigured.
    pub fn new(config: &NarrativeConfig, api_key: Option<String>) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_s))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    async fn request(&self, api_key: &str, prompt: String) -> Result<String, UpstreamError> {
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let req = self.client.post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send().await?;

        let status = req.status();
        if !status.is_success() {
            return Err(UpstreamError(format!("generateContent returned {:?}", status)));
        }

        let json = req.text().await?;
        let resp: GenerateContentResponse = serde_json::from_str(&json)?;

        Ok(resp.text())
    }

    async fn narrate(&self, location: &Location, daily: &[DailySummary]) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return MISSING_KEY_MESSAGE.to_string();
        };

        match self.request(api_key, build_prompt(location, daily)).await {
            Ok(text) => reply_or_fallback(text),
            Err(e) => {
                log::warn!("[NARRATIVE] Generation failed for {}: {}", location.name, e);
                ERROR_MESSAGE.to_string()
            }
        }
    }
}

impl NarrativeGenerator for GeminiNarrator {
    fn generate<'a>(&'a self, location: &'a Location, daily: &'a [DailySummary]) -> BoxFuture<'a, String> {
        self.narrate(location, daily).boxed()
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
