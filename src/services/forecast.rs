//! Forecast assembly.
//!
//! Turns the provider's 3-hour series into the compact response: today's
//! conditions first, then one representative sample per future calendar day
//! (the one whose local hour is closest to noon), ascending, capped at
//! `MAX_FUTURE_DAYS`.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Timelike};

use crate::errors::AppError;
use crate::helpers::{format_short_date, hours_from_noon, round_to_i64};
use crate::models::{DayForecast, RawSample};
use crate::services::openweather::OpenWeatherClient;

/// Number of future days returned after today's entry.
pub const MAX_FUTURE_DAYS: usize = 5;

/// Look up the weather for a city: geocode, fetch the series, assemble the forecast.
///
/// Upstream errors (`NotFound`, `NoData`, `UpstreamError`) propagate unchanged.
pub async fn get_weather_for_city(
    client: &OpenWeatherClient,
    city: &str,
) -> Result<Vec<DayForecast>, AppError> {
    tracing::info!("Getting weather for city: {}", city);

    let coords = client.resolve_city(city).await?;
    let series = client.fetch_series(coords).await?;

    let first = series
        .first()
        .ok_or_else(|| AppError::NoData("No current weather data available".to_string()))?;
    let current = current_conditions(city, first);

    Ok(build_forecast(current, &series))
}

/// Today's entry, derived from the first sample of the series.
pub fn current_conditions(city: &str, first: &RawSample) -> DayForecast {
    to_day_forecast(city, first, &Local)
}

/// Assemble the forecast using the local timezone and today's local date.
pub fn build_forecast(current: DayForecast, series: &[RawSample]) -> Vec<DayForecast> {
    build_forecast_in(current, series, &Local, Local::now().date_naive())
}

/// Assemble the forecast relative to `today` in `tz`.
///
/// Samples dated today or earlier are skipped. For each later date the first
/// sample seen is kept unless a subsequent one is strictly closer to noon.
pub(crate) fn build_forecast_in<Tz: TimeZone>(
    current: DayForecast,
    series: &[RawSample],
    tz: &Tz,
    today: NaiveDate,
) -> Vec<DayForecast> {
    // date -> (distance from noon, sample)
    let mut candidates: BTreeMap<NaiveDate, (u32, &RawSample)> = BTreeMap::new();

    for sample in series {
        let Some(local) = local_time(sample.epoch_seconds, tz) else {
            tracing::warn!(
                "Skipping sample with out-of-range timestamp {}",
                sample.epoch_seconds
            );
            continue;
        };

        let date = local.date_naive();
        if date <= today {
            continue;
        }

        let distance = hours_from_noon(local.hour());
        match candidates.entry(date) {
            Entry::Vacant(slot) => {
                slot.insert((distance, sample));
            }
            Entry::Occupied(mut slot) => {
                if distance < slot.get().0 {
                    slot.insert((distance, sample));
                }
            }
        }
    }

    let city = current.city.clone();
    let mut forecast = Vec::with_capacity(1 + candidates.len().min(MAX_FUTURE_DAYS));
    forecast.push(current);
    forecast.extend(
        candidates
            .values()
            .take(MAX_FUTURE_DAYS)
            .map(|(_, sample)| to_day_forecast(&city, sample, tz)),
    );

    tracing::info!("Generated forecast for {} days", forecast.len());
    for day in &forecast {
        tracing::debug!("Date: {}, Temp: {}°F", day.date, day.temp_f);
    }

    forecast
}

/// Convert a raw sample to the client-facing shape, dated in `tz`.
fn to_day_forecast<Tz: TimeZone>(city: &str, sample: &RawSample, tz: &Tz) -> DayForecast {
    let date = local_time(sample.epoch_seconds, tz)
        .map(|dt| format_short_date(dt.date_naive()))
        .unwrap_or_default();

    DayForecast {
        city: city.to_string(),
        date,
        icon: sample.condition_icon.clone(),
        icon_description: sample.condition_description.clone(),
        temp_f: round_to_i64(sample.temperature),
        wind_speed: round_to_i64(sample.wind_speed),
        humidity: sample.humidity,
    }
}

fn local_time<Tz: TimeZone>(epoch_seconds: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp(epoch_seconds, 0).map(|utc| utc.with_timezone(tz))
}
