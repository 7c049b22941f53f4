//! Business rules for inbound forecast requests.

use chrono::{Days, NaiveDate};

use crate::{
    error::ApiError,
    model::{ForecastRequest, ValidatedRequest},
};

/// Wire format of the `date` field.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// How many days past today a forecast may be requested for.
pub const FORECAST_WINDOW_DAYS: u64 = 4;

pub const TOKEN_REQUIRED: &str = "token is required";
pub const WRONG_TOKEN: &str = "wrong API token";
pub const LOCATION_REQUIRED: &str = "location is required";
pub const INVALID_DATE_FORMAT: &str = "date should be in DD-MM-YYYY format";
pub const DATE_OUT_OF_WINDOW: &str = "weather date should be within current day or next 4 days";

/// First and last day (inclusive) a forecast may be requested for.
pub fn forecast_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let last = today
        .checked_add_days(Days::new(FORECAST_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX);
    (today, last)
}

/// Check `request` against the configured token and the forecast window.
///
/// Rules run in a fixed order and the first failure wins, so a request with
/// neither token nor location is reported as missing its token.
pub fn validate_request(
    request: &ForecastRequest,
    expected_token: &str,
    today: NaiveDate,
) -> Result<ValidatedRequest, ApiError> {
    let token = non_empty(request.token.as_deref())
        .ok_or_else(|| ApiError::validation(TOKEN_REQUIRED))?;
    if token != expected_token {
        return Err(ApiError::auth(WRONG_TOKEN));
    }

    let location = non_empty(request.location.as_deref())
        .ok_or_else(|| ApiError::validation(LOCATION_REQUIRED))?;

    let date = match request.date.as_deref() {
        None => today,
        Some(raw) => parse_date(raw)?,
    };

    let (first, last) = forecast_window(today);
    if date < first || date > last {
        return Err(ApiError::validation(DATE_OUT_OF_WINDOW)
            .with_field("date_from", first.format(DATE_FORMAT).to_string())
            .with_field("date_to", last.format(DATE_FORMAT).to_string()));
    }

    Ok(ValidatedRequest {
        location: location.to_string(),
        date,
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| ApiError::validation(INVALID_DATE_FORMAT).with_field("date", raw))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
