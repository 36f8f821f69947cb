//! OpenWeather client: geocoding and the 5-day / 3-hour forecast.
//!
//! See: https://openweathermap.org/api/geocoding-api
//! and https://openweathermap.org/forecast5

use serde::Deserialize;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::{Coordinates, RawSample};

const GEOCODE_PATH: &str = "/geo/1.0/direct";
const FORECAST_PATH: &str = "/data/2.5/forecast";

/// Client for the OpenWeather geocoding and forecast APIs.
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

// --- OpenWeather JSON response types ---

/// One entry of the geocoding response array.
#[derive(Debug, Deserialize)]
pub(crate) struct GeoLocation {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    main: ForecastMain,
    #[serde(default)]
    weather: Vec<ForecastCondition>,
    wind: ForecastWind,
}

#[derive(Debug, Deserialize)]
struct ForecastMain {
    temp: f64,
    humidity: i64,
}

#[derive(Debug, Deserialize)]
struct ForecastCondition {
    icon: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ForecastWind {
    speed: f64,
}

impl OpenWeatherClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Resolve a free-text city name to the coordinates of the first geocoder match.
    pub async fn resolve_city(&self, name: &str) -> Result<Coordinates, AppError> {
        let url = format!("{}{}", self.base_url, GEOCODE_PATH);
        tracing::debug!("Fetching location data for '{}' from {}", name, url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", name), ("limit", "1"), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                // reqwest errors carry the request URL, which includes the API key
                tracing::error!("Geocode request failed: {}", e.without_url());
                AppError::UpstreamError("Failed to fetch location data".to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Geocode API returned HTTP {}: {}", status, body);
            return Err(AppError::UpstreamError(format!(
                "Geocode API returned HTTP {}",
                status
            )));
        }

        let locations: Vec<GeoLocation> = response.json().await.map_err(|e| {
            AppError::UpstreamError(format!("Geocode JSON parse error: {}", e.without_url()))
        })?;
        tracing::debug!("Location data received: {:?}", locations);

        first_coordinates(name, &locations)
    }

    /// Fetch the raw 3-hour forecast series (imperial units) for a location.
    pub async fn fetch_series(&self, coords: Coordinates) -> Result<Vec<RawSample>, AppError> {
        let url = format!("{}{}", self.base_url, FORECAST_PATH);
        tracing::debug!(
            "Fetching forecast for lat={} lon={} from {}",
            coords.latitude,
            coords.longitude,
            url
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("units", "imperial".to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Forecast request failed: {}", e.without_url());
                AppError::UpstreamError("Failed to fetch weather data".to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Forecast API returned HTTP {}: {}", status, body);
            return Err(AppError::UpstreamError(format!(
                "Forecast API returned HTTP {}",
                status
            )));
        }

        let forecast: ForecastResponse = response.json().await.map_err(|e| {
            AppError::UpstreamError(format!("Forecast JSON parse error: {}", e.without_url()))
        })?;

        samples_from_response(forecast)
    }
}

/// Pick the first geocoder match. An empty result list means the city is unknown.
pub(crate) fn first_coordinates(
    name: &str,
    locations: &[GeoLocation],
) -> Result<Coordinates, AppError> {
    let first = locations
        .first()
        .ok_or_else(|| AppError::NotFound(format!("City not found: {}", name)))?;
    Ok(Coordinates {
        latitude: first.lat,
        longitude: first.lon,
    })
}

/// Flatten a forecast response into raw samples. An empty series is `NoData`.
pub(crate) fn samples_from_response(
    response: ForecastResponse,
) -> Result<Vec<RawSample>, AppError> {
    if response.list.is_empty() {
        return Err(AppError::NoData(
            "No current weather data available".to_string(),
        ));
    }

    Ok(response
        .list
        .into_iter()
        .map(|entry| {
            let (icon, description) = entry
                .weather
                .into_iter()
                .next()
                .map(|c| (c.icon, c.description))
                .unwrap_or_default();
            RawSample {
                epoch_seconds: entry.dt,
                temperature: entry.main.temp,
                humidity: entry.main.humidity,
                wind_speed: entry.wind.speed,
                condition_icon: icon,
                condition_description: description,
            }
        })
        .collect())
}
