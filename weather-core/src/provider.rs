use crate::model::RawForecast;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of the raw multi-day forecast the mapper works on.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, location: &str) -> anyhow::Result<RawForecast>;
}
