use chrono::{Local, NaiveDate, TimeZone};

use crate::{
    error::SchemaError,
    model::{ForecastDetail, ForecastResult, RawForecast, RawForecastEntry},
    schema::{first_condition, round_half_even, timestamp},
};

/// Reduce a multi-day provider forecast to the entries of `date` in the server's time zone.
pub fn map_forecast(raw: &RawForecast, date: NaiveDate) -> Result<ForecastResult, SchemaError> {
    map_forecast_in(raw, date, &Local)
}

/// Same as [`map_forecast`], deriving each entry's calendar date in `tz`.
pub fn map_forecast_in<Tz: TimeZone>(
    raw: &RawForecast,
    date: NaiveDate,
    tz: &Tz,
) -> Result<ForecastResult, SchemaError> {
    let mut weather_details = Vec::new();

    for entry in &raw.list {
        let at = timestamp(entry.dt)?;
        if at.with_timezone(tz).date_naive() != date {
            continue;
        }
        weather_details.push(map_entry(entry)?);
    }

    tracing::debug!(
        location = %raw.city.name,
        %date,
        total = raw.list.len(),
        matched = weather_details.len(),
        "mapped provider forecast"
    );

    Ok(ForecastResult {
        location_name: raw.city.name.clone(),
        weather_details,
    })
}

fn map_entry(entry: &RawForecastEntry) -> Result<ForecastDetail, SchemaError> {
    Ok(ForecastDetail {
        forecast_datetime: timestamp(entry.dt)?,
        temp: round_half_even(entry.main.temp, "temp")?,
        humidity: entry.main.humidity,
        feels_like: round_half_even(entry.main.feels_like, "feels_like")?,
        weather: first_condition(entry.dt, &entry.weather)?,
        wind_speed: entry.wind.speed,
    })
}
