use chrono::{Local, NaiveDate};
use std::time::{Duration, Instant};

use crate::{
    config::Config,
    error::ApiError,
    mapper::map_forecast,
    model::{ForecastRequest, WeatherEnvelope},
    provider::{ForecastProvider, OpenWeatherProvider},
    validation::validate_request,
};

/// Runs the forecast pipeline: validate, fetch, map, check, time.
#[derive(Debug)]
pub struct WeatherService {
    api_token: String,
    provider: Box<dyn ForecastProvider>,
}

impl WeatherService {
    pub fn new(api_token: String, provider: Box<dyn ForecastProvider>) -> Self {
        Self { api_token, provider }
    }

    /// Build the service with an OpenWeather provider, failing fast on missing secrets.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_token = config.api_token()?.to_owned();
        let provider = OpenWeatherProvider::from_config(config)?;
        Ok(Self::new(api_token, Box::new(provider)))
    }

    pub async fn handle(&self, request: &ForecastRequest) -> Result<WeatherEnvelope, ApiError> {
        self.handle_on(request, Local::now().date_naive()).await
    }

    async fn handle_on(
        &self,
        request: &ForecastRequest,
        today: NaiveDate,
    ) -> Result<WeatherEnvelope, ApiError> {
        let started = Instant::now();

        let validated = validate_request(request, &self.api_token, today)?;

        let raw = self
            .provider
            .fetch_forecast(&validated.location)
            .await
            .map_err(ApiError::Provider)?;

        let weather = map_forecast(&raw, validated.date)?;
        weather.validate()?;

        let elapsed = started.elapsed();
        tracing::info!(
            location = %validated.location,
            date = %validated.date,
            entries = weather.weather_details.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "forecast served"
        );

        Ok(WeatherEnvelope {
            request_duration: format_duration(elapsed),
            weather,
        })
    }
}

/// `H:MM:SS[.ffffff]`, the microsecond part omitted when zero.
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, secs % 3600 / 60, secs % 60);
    let micros = elapsed.subsec_micros();

    if micros == 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{hours}:{minutes:02}:{seconds:02}.{micros:06}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawCity, RawCondition, RawForecast, RawForecastEntry, RawMain, RawWind};
    use crate::validation::{DATE_FORMAT, WRONG_TOKEN};
    use async_trait::async_trait;
    use chrono::{Days, NaiveTime};
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    const SECRET: &str = "s3cret";

    #[derive(Debug, Clone)]
    struct StubProvider {
        forecast: Option<RawForecast>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ForecastProvider for StubProvider {
        async fn fetch_forecast(&self, _location: &str) -> anyhow::Result<RawForecast> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.forecast
                .clone()
                .ok_or_else(|| anyhow::anyhow!("provider unavailable"))
        }
    }

    fn at_local(date: NaiveDate, hour: u32) -> i64 {
        date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
            .and_local_timezone(Local)
            .earliest()
            .unwrap()
            .timestamp()
    }

    fn entry(dt: i64, description: &str) -> RawForecastEntry {
        RawForecastEntry {
            dt,
            main: RawMain {
                temp: 12.5,
                feels_like: 11.2,
                humidity: 55,
            },
            weather: vec![RawCondition {
                description: description.into(),
            }],
            wind: RawWind { speed: 4.0 },
        }
    }

    fn forecast(today: NaiveDate) -> RawForecast {
        let tomorrow = today + Days::new(1);
        RawForecast {
            city: RawCity { name: "Kyiv".into() },
            list: vec![
                entry(at_local(today, 9), "today morning"),
                entry(at_local(today, 15), "today afternoon"),
                entry(at_local(tomorrow, 9), "tomorrow morning"),
            ],
        }
    }

    fn service(forecast: Option<RawForecast>) -> (WeatherService, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let stub = StubProvider {
            forecast,
            calls: calls.clone(),
        };
        (WeatherService::new(SECRET.into(), Box::new(stub)), calls)
    }

    fn request(date: Option<NaiveDate>) -> ForecastRequest {
        ForecastRequest {
            token: Some(SECRET.into()),
            location: Some("kyiv".into()),
            date: date.map(|d| d.format(DATE_FORMAT).to_string()),
        }
    }

    #[tokio::test]
    async fn serves_requested_day_only() {
        let today = Local::now().date_naive();
        let (svc, calls) = service(Some(forecast(today)));

        let envelope = svc.handle_on(&request(Some(today)), today).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(envelope.weather.location_name, "Kyiv");
        let weather: Vec<_> = envelope.weather.weather_details.iter().map(|d| d.weather.as_str()).collect();
        assert_eq!(weather, ["today morning", "today afternoon"]);
        assert_eq!(envelope.weather.weather_details[0].temp, 12);
        assert!(envelope.request_duration.starts_with("0:00:"));
    }

    #[tokio::test]
    async fn absent_date_means_today() {
        let today = Local::now().date_naive();
        let (svc, _) = service(Some(forecast(today)));

        let envelope = svc.handle_on(&request(None), today).await.unwrap();
        assert_eq!(envelope.weather.weather_details.len(), 2);
    }

    #[tokio::test]
    async fn rejected_requests_never_reach_the_provider() {
        let today = Local::now().date_naive();
        let (svc, calls) = service(Some(forecast(today)));

        let mut bad_token = request(None);
        bad_token.token = Some("guess".into());
        let err = svc.handle_on(&bad_token, today).await.unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.body().message, WRONG_TOKEN);

        let err = svc.handle_on(&request(Some(today + Days::new(5))), today).await.unwrap_err();
        assert_eq!(err.status_code(), 400);

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn provider_failure_is_a_server_error() {
        let today = Local::now().date_naive();
        let (svc, calls) = service(None);

        let err = svc.handle_on(&request(None), today).await.unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(err, ApiError::Provider(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn schema_violation_is_a_server_error() {
        let today = Local::now().date_naive();
        let mut broken = forecast(today);
        broken.city.name.clear();
        let (svc, _) = service(Some(broken));

        let err = svc.handle_on(&request(None), today).await.unwrap_err();

        assert!(matches!(err, ApiError::Schema(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn from_config_requires_token_and_key() {
        let mut cfg = Config::default();
        let err = WeatherService::from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API token configured"));

        cfg.api_token = Some(SECRET.into());
        let err = WeatherService::from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));

        cfg.api_key = Some("KEY".into());
        assert!(WeatherService::from_config(&cfg).is_ok());
    }

    #[test]
    fn duration_matches_timedelta_text() {
        assert_eq!(format_duration(Duration::from_micros(123_456)), "0:00:00.123456");
        assert_eq!(format_duration(Duration::from_secs(3_725)), "1:02:05");
        assert_eq!(format_duration(Duration::from_nanos(1_500)), "0:00:00.000001");
    }
}
