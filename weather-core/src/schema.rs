//! Guards between provider data and the typed response contract.
//!
//! The mapper builds every output value through these helpers and the
//! orchestrator runs [`ForecastResult::validate`] before responding, so a
//! change in the provider's payload surfaces as a [`SchemaError`] instead of
//! a malformed response.

use chrono::{DateTime, Utc};

use crate::{
    error::SchemaError,
    model::{ForecastResult, RawCondition},
};

/// Round to the nearest integer, ties to even (`20.5 -> 20`, `21.5 -> 22`).
pub fn round_half_even(value: f64, field: &'static str) -> Result<i32, SchemaError> {
    let rounded = value.round_ties_even();
    if !rounded.is_finite() || rounded < f64::from(i32::MIN) || rounded > f64::from(i32::MAX) {
        return Err(SchemaError::InvalidNumber { field, value });
    }
    Ok(rounded as i32)
}

/// Description of the first reported condition of the entry at `dt`.
pub fn first_condition(dt: i64, conditions: &[RawCondition]) -> Result<String, SchemaError> {
    conditions
        .first()
        .map(|c| c.description.clone())
        .ok_or(SchemaError::MissingCondition(dt))
}

pub fn timestamp(dt: i64) -> Result<DateTime<Utc>, SchemaError> {
    DateTime::from_timestamp(dt, 0).ok_or(SchemaError::InvalidTimestamp(dt))
}

impl ForecastResult {
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.location_name.is_empty() {
            return Err(SchemaError::Empty { field: "location_name" });
        }

        for detail in &self.weather_details {
            if detail.weather.is_empty() {
                return Err(SchemaError::Empty { field: "weather" });
            }
            if !detail.wind_speed.is_finite() || detail.wind_speed < 0.0 {
                return Err(SchemaError::InvalidWindSpeed(detail.wind_speed));
            }
        }

        Ok(())
    }
}
