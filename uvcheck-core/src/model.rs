use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// The `data.instant.details` object exactly as the forecast service sent it.
pub type RawDetails = Map<String, Value>;

/// Reads a JSON value as a finite number. Numeric strings are accepted.
pub fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Fixed projection of the instant attributes we display.
///
/// Every field is always serialized, as `null` when the source entry did
/// not carry a usable value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstantDetails {
    pub air_pressure_at_sea_level: Option<f64>,
    pub air_temperature: Option<f64>,
    pub cloud_area_fraction: Option<f64>,
    pub cloud_area_fraction_high: Option<f64>,
    pub cloud_area_fraction_low: Option<f64>,
    pub cloud_area_fraction_medium: Option<f64>,
    pub dew_point_temperature: Option<f64>,
    pub fog_area_fraction: Option<f64>,
    pub relative_humidity: Option<f64>,
    pub ultraviolet_index_clear_sky: Option<f64>,
    pub wind_from_direction: Option<f64>,
    pub wind_speed: Option<f64>,
}

impl InstantDetails {
    pub const KEYS: [&'static str; 12] = [
        "air_pressure_at_sea_level",
        "air_temperature",
        "cloud_area_fraction",
        "cloud_area_fraction_high",
        "cloud_area_fraction_low",
        "cloud_area_fraction_medium",
        "dew_point_temperature",
        "fog_area_fraction",
        "relative_humidity",
        "ultraviolet_index_clear_sky",
        "wind_from_direction",
        "wind_speed",
    ];

    /// Picks the recognized attributes out of `raw`; anything else is dropped.
    pub fn project(raw: &RawDetails) -> Self {
        let get = |key: &str| raw.get(key).and_then(numeric);

        Self {
            air_pressure_at_sea_level: get("air_pressure_at_sea_level"),
            air_temperature: get("air_temperature"),
            cloud_area_fraction: get("cloud_area_fraction"),
            cloud_area_fraction_high: get("cloud_area_fraction_high"),
            cloud_area_fraction_low: get("cloud_area_fraction_low"),
            cloud_area_fraction_medium: get("cloud_area_fraction_medium"),
            dew_point_temperature: get("dew_point_temperature"),
            fog_area_fraction: get("fog_area_fraction"),
            relative_humidity: get("relative_humidity"),
            ultraviolet_index_clear_sky: get("ultraviolet_index_clear_sky"),
            wind_from_direction: get("wind_from_direction"),
            wind_speed: get("wind_speed"),
        }
    }
}

/// One forecast sample.
///
/// `time` is kept as the ISO-8601 text the service sent; a sample with an
/// unreadable timestamp still counts towards the peak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesEntry {
    pub time: String,
    pub details: RawDetails,
}

impl TimeseriesEntry {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.time)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// Forecast samples in ascending time order. The first entry is "now".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastSeries {
    entries: Vec<TimeseriesEntry>,
}

impl ForecastSeries {
    pub fn new(entries: Vec<TimeseriesEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[TimeseriesEntry] {
        &self.entries
    }

    pub fn first(&self) -> Option<&TimeseriesEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<TimeseriesEntry> for ForecastSeries {
    fn from_iter<I: IntoIterator<Item = TimeseriesEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// What the display keeps between fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub latest: InstantDetails,
    pub peak_uv: f64,
    /// Time of the first sample, when it could be read.
    pub latest_time: Option<DateTime<Utc>>,
}
