use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    config::ForecastConfig,
    error::UvError,
    model::{Coordinate, ForecastSeries, RawDetails, TimeseriesEntry},
};

use super::WeatherDataSource;

pub const DEFAULT_ENDPOINT: &str = "https://api.met.no/weatherapi/locationforecast/2.0/complete";

/// MET Norway Locationforecast client.
#[derive(Debug, Clone)]
pub struct MetNoSource {
    endpoint: String,
    http: Client,
}

impl MetNoSource {
    /// MET Norway rejects requests without an identifying `User-Agent`.
    pub fn new(
        endpoint: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, UvError> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    pub fn from_config(config: &ForecastConfig) -> Result<Self, UvError> {
        Self::new(
            config.endpoint.clone(),
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Debug, Deserialize)]
struct MetResponse {
    properties: MetProperties,
}

#[derive(Debug, Deserialize)]
struct MetProperties {
    #[serde(default)]
    timeseries: Vec<MetStep>,
}

#[derive(Debug, Deserialize)]
struct MetStep {
    // Only the first timestamp is ever shown; a bad one must not sink the series.
    #[serde(default)]
    time: Value,
    data: MetData,
}

#[derive(Debug, Deserialize)]
struct MetData {
    instant: MetInstant,
}

#[derive(Debug, Deserialize)]
struct MetInstant {
    details: Option<RawDetails>,
}

impl From<MetStep> for TimeseriesEntry {
    fn from(step: MetStep) -> Self {
        let time = match step.time {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };

        TimeseriesEntry {
            time,
            details: step.data.instant.details.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl WeatherDataSource for MetNoSource {
    async fn fetch_series(&self, coordinate: Coordinate) -> Result<ForecastSeries, UvError> {
        let lat = round_coordinate(coordinate.latitude).to_string();
        let lon = round_coordinate(coordinate.longitude).to_string();

        tracing::debug!(endpoint = %self.endpoint, %lat, %lon, "requesting forecast");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[("lat", lat.as_str()), ("lon", lon.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::warn!(%status, "forecast request failed");
            return Err(UvError::Fetch {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: MetResponse =
            serde_json::from_str(&body).map_err(|e| UvError::Decode(e.to_string()))?;

        Ok(parsed
            .properties
            .timeseries
            .into_iter()
            .map(TimeseriesEntry::from)
            .collect())
    }
}

/// The API accepts at most four decimals.
fn round_coordinate(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
