use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Inbound request body. Every field is optional on the wire so that the
/// validator, not the JSON decoder, decides what "missing" means.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastRequest {
    pub token: Option<String>,
    pub location: Option<String>,
    /// `DD-MM-YYYY`; today when absent.
    pub date: Option<String>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub location: String,
    pub date: NaiveDate,
}

/// One forecast slot of the compact response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastDetail {
    pub forecast_datetime: DateTime<Utc>,
    pub temp: i32,
    pub humidity: u8,
    pub feels_like: i32,
    pub weather: String,
    pub wind_speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastResult {
    pub location_name: String,
    pub weather_details: Vec<ForecastDetail>,
}

/// Success body of the forecast endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherEnvelope {
    pub request_duration: String,
    pub weather: ForecastResult,
}

/// OpenWeather `/forecast` payload, reduced to the fields the mapper reads.
#[derive(Debug, Clone, Deserialize)]
pub struct RawForecast {
    pub city: RawCity,
    pub list: Vec<RawForecastEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCity {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawForecastEntry {
    /// Unix seconds.
    pub dt: i64,
    pub main: RawMain,
    pub weather: Vec<RawCondition>,
    pub wind: RawWind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCondition {
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawWind {
    pub speed: f64,
}
