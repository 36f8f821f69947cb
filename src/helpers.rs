//! Shared helpers for turning provider values into display values.
//!
//! - `round_to_i64`: rounds a measurement to the nearest integer. Uses
//!   `f64::round`, so `.5` cases round half away from zero (`2.5 → 3`,
//!   `-2.5 → -3`).
//! - `format_short_date`: renders a calendar date in the short US form
//!   (`M/D/YYYY`, no zero padding).
//!
//! `round_to_i64` returns 0 for non-finite inputs (NaN, ±Inf).

use chrono::{Datelike, NaiveDate};

/// Round a measurement to the nearest integer, half away from zero.
pub(crate) fn round_to_i64(v: f64) -> i64 {
    if !v.is_finite() {
        tracing::warn!("round_to_i64 received non-finite value {}, defaulting to 0", v);
        return 0;
    }
    v.round() as i64
}

/// Format a calendar date as `M/D/YYYY`.
pub(crate) fn format_short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Distance in hours between `hour` (0–23) and noon.
pub(crate) fn hours_from_noon(hour: u32) -> u32 {
    hour.abs_diff(12)
}
