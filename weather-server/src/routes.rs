use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use weather_core::{ApiError, ForecastRequest, WeatherEnvelope, WeatherService};

pub const WEATHER_PATH: &str = "/content/api/v1/integration/weather";

const HOME_PAGE: &str = "<p><h2>KMA L2 Yankin: Python Saas.</h2></p>";

pub fn router(service: Arc<WeatherService>) -> Router {
    Router::new()
        .route("/", get(home_page))
        .route(WEATHER_PATH, post(weather_endpoint))
        .with_state(service)
}

/// GET / — static landing page.
async fn home_page() -> Html<&'static str> {
    Html(HOME_PAGE)
}

/// POST /content/api/v1/integration/weather — forecast for one location and day.
async fn weather_endpoint(
    State(service): State<Arc<WeatherService>>,
    body: Result<Json<ForecastRequest>, JsonRejection>,
) -> Result<Json<WeatherEnvelope>, HttpError> {
    let Json(request) = body.map_err(|rejection| ApiError::validation(rejection.body_text()))?;
    let envelope = service.handle(&request).await?;
    Ok(Json(envelope))
}

/// Boundary type turning pipeline errors into status code + JSON body.
#[derive(Debug)]
pub struct HttpError(ApiError);

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_client_error() {
            tracing::warn!(status = status.as_u16(), error = %self.0, "request rejected");
        } else {
            tracing::error!(status = status.as_u16(), error = %self.0, "request failed");
        }

        (status, Json(self.0.body())).into_response()
    }
}
