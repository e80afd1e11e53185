use crate::{Config, Coordinate, ForecastSeries, UvError, provider::metno::MetNoSource};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod metno;

/// Read-only source of forecast samples for a coordinate.
#[async_trait]
pub trait WeatherDataSource: Send + Sync + Debug {
    async fn fetch_series(&self, coordinate: Coordinate) -> Result<ForecastSeries, UvError>;
}

#[async_trait]
impl<T: WeatherDataSource + ?Sized> WeatherDataSource for Box<T> {
    async fn fetch_series(&self, coordinate: Coordinate) -> Result<ForecastSeries, UvError> {
        (**self).fetch_series(coordinate).await
    }
}

/// Construct the forecast source described by the `[forecast]` section.
pub fn source_from_config(config: &Config) -> Result<Box<dyn WeatherDataSource>, UvError> {
    let source = MetNoSource::from_config(&config.forecast)?;
    Ok(Box::new(source))
}
