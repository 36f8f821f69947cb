//! Weather lookup endpoint.
//!
//! - POST /api/weather  body: `{ "cityName": "..." }`

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;

use super::AppState;
use crate::errors::{AppError, ErrorResponse};
use crate::models::DayForecast;
use crate::services::forecast::get_weather_for_city;

/// Request body for a city lookup.
#[derive(Debug, Deserialize, ToSchema)]
pub struct WeatherRequest {
    /// Free-text city name (e.g. "San Diego")
    #[serde(rename = "cityName")]
    pub city_name: String,
}

/// Get today's weather and a 5-day forecast for a city.
///
/// The first element is today's conditions; the rest are one entry per
/// future day, closest to noon. A successful lookup is saved to the
/// search history.
#[utoipa::path(
    post,
    path = "/api/weather",
    tag = "Weather",
    request_body = WeatherRequest,
    responses(
        (status = 200, description = "Today's conditions followed by up to 5 future days", body = Vec<DayForecast>),
        (status = 400, description = "Missing city name or malformed body", body = ErrorResponse),
        (status = 404, description = "City not found", body = ErrorResponse),
        (status = 502, description = "Weather provider error or empty forecast", body = ErrorResponse),
    )
)]
pub async fn get_weather(
    State(state): State<AppState>,
    payload: Result<Json<WeatherRequest>, JsonRejection>,
) -> Result<Json<Vec<DayForecast>>, AppError> {
    let Json(body) = payload?;
    let city = body.city_name.trim();
    if city.is_empty() {
        return Err(AppError::BadRequest("City name is required".to_string()));
    }

    let forecast = get_weather_for_city(&state.client, city).await?;

    // History is best-effort; a failed write must not hide the forecast.
    if let Err(e) = state.history.add(city).await {
        tracing::warn!("Failed to save '{}' to search history: {}", city, e);
    }

    Ok(Json(forecast))
}
