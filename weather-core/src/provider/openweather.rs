use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::{config::Config, model::RawForecast};

use super::ForecastProvider;

/// Client for the OpenWeather 5-day / 3-hour forecast endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_url: String,
    api_key: String,
    language: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_url: String, api_key: String, language: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self {
            api_url,
            api_key,
            language,
            http,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.api_url.clone(),
            config.api_key()?.to_owned(),
            config.language.clone(),
            config.timeout(),
        )
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    async fn fetch_forecast(&self, location: &str) -> Result<RawForecast> {
        tracing::debug!(url = %self.api_url, location, "requesting OpenWeather forecast");

        let res = self
            .http
            .get(&self.api_url)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("lang", self.language.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .context("Failed to send request to OpenWeather (5-day forecast)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeather forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: RawForecast =
            serde_json::from_str(&body).context("Failed to parse OpenWeather forecast JSON")?;

        tracing::debug!(
            city = %parsed.city.name,
            entries = parsed.list.len(),
            "OpenWeather forecast received"
        );

        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
