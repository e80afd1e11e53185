//! Reduction of a forecast series to the latest reading and the peak UV.

use serde_json::Value;

use crate::{
    error::UvError,
    model::{ForecastSeries, InstantDetails, Summary, numeric},
};

pub const UV_KEY: &str = "ultraviolet_index_clear_sky";

/// UV index used for the peak scan.
///
/// Missing or non-numeric readings count as `0.0` so that an instant
/// without UV data still takes part in the maximum as "no UV risk".
pub fn coerce_uv(value: Option<&Value>) -> f64 {
    value.and_then(numeric).unwrap_or(0.0)
}

pub fn summarize(series: &ForecastSeries) -> Result<Summary, UvError> {
    let first = series.first().ok_or(UvError::EmptySeries)?;

    let peak_uv = series
        .entries()
        .iter()
        .map(|entry| coerce_uv(entry.details.get(UV_KEY)))
        .fold(f64::NEG_INFINITY, f64::max);

    let latest_time = first.timestamp();
    if latest_time.is_none() {
        tracing::debug!(time = %first.time, "latest sample has an unreadable timestamp");
    }

    tracing::debug!(entries = series.len(), peak_uv, "summarized forecast series");

    Ok(Summary {
        latest: InstantDetails::project(&first.details),
        peak_uv,
        latest_time,
    })
}
