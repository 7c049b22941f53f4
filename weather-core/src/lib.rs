//! Core library for the weather forecast facade.
//!
//! This crate defines:
//! - Configuration loading
//! - Request validation (token, location, forecast window)
//! - The OpenWeather forecast client
//! - Mapping of the provider payload into the compact response schema
//! - `WeatherService`, which runs the whole pipeline for one request
//!
//! It is used by `weather-server`, which only adds the HTTP layer on top.

pub mod config;
pub mod error;
pub mod mapper;
pub mod model;
pub mod provider;
pub mod schema;
pub mod service;
pub mod validation;

pub use config::Config;
pub use error::{ApiError, ErrorBody, SchemaError};
pub use model::{ForecastDetail, ForecastRequest, ForecastResult, RawForecast, WeatherEnvelope};
pub use provider::{ForecastProvider, OpenWeatherProvider};
pub use service::WeatherService;
