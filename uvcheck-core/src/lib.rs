//! Core library for the `uvcheck` CLI.
//!
//! This crate defines:
//! - The forecast domain model and its reduction to a latest/peak UV summary
//! - UV severity bands used for display colors
//! - Abstractions over the forecast source and the location provider
//! - The display state record and the pipeline that drives it
//! - Configuration handling
//!
//! It is used by `uvcheck-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod session;
pub mod severity;
pub mod state;
pub mod summary;

pub use config::{Config, ForecastConfig, LocationConfig};
pub use error::UvError;
pub use location::{ConfiguredLocation, LocationProvider, NominatimGeocoder, Permission};
pub use model::{Coordinate, ForecastSeries, InstantDetails, Summary, TimeseriesEntry};
pub use provider::{WeatherDataSource, metno::MetNoSource};
pub use session::Session;
pub use severity::{Severity, classify};
pub use state::{AppState, Event, RefreshTicket};
pub use summary::{coerce_uv, summarize};
