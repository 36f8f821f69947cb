use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A resolved location. Produced by the geocoder and consumed once by the forecast fetch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One 3-hour sample of the provider's forecast time series (imperial units).
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    /// Sample time as Unix seconds.
    pub epoch_seconds: i64,
    /// Temperature in °F
    pub temperature: f64,
    /// Relative humidity, 0–100
    pub humidity: i64,
    /// Wind speed in mph
    pub wind_speed: f64,
    pub condition_icon: String,
    pub condition_description: String,
}

/// A single day's weather as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DayForecast {
    /// City name as supplied by the caller
    pub city: String,
    /// Calendar day in `M/D/YYYY` form
    pub date: String,
    /// Provider icon code (e.g. "10d")
    pub icon: String,
    /// Human-readable condition (e.g. "light rain")
    #[serde(rename = "iconDescription")]
    pub icon_description: String,
    /// Temperature in °F, rounded
    #[serde(rename = "tempF")]
    pub temp_f: i64,
    /// Wind speed in mph, rounded
    #[serde(rename = "windSpeed")]
    pub wind_speed: i64,
    /// Relative humidity percentage
    pub humidity: i64,
}

/// A previously searched city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct City {
    /// UUID v4 identifier
    pub id: String,
    /// City name as first entered
    pub name: String,
}
