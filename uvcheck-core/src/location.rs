//! Where the coordinates come from.
//!
//! A terminal has no location sensor, so [`ConfiguredLocation`] plays the
//! device's part: the user's consent and coordinates live in the config file
//! (or on the command line) and place names are looked up through
//! [`NominatimGeocoder`].

use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{config::LocationConfig, error::UvError, model::Coordinate};

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";
const GEOCODE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    async fn request_permission(&self) -> Permission;

    async fn current_coordinate(&self) -> Result<Coordinate, UvError>;

    /// Human-readable name for `coordinate`, if one can be found.
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Option<String>;
}

/// Location taken from configuration rather than a sensor.
#[derive(Debug, Clone)]
pub struct ConfiguredLocation {
    share: bool,
    coordinate: Option<Coordinate>,
    place_name: Option<String>,
    geocoder: Option<NominatimGeocoder>,
}

impl ConfiguredLocation {
    pub fn new(share: bool, coordinate: Option<Coordinate>) -> Self {
        Self {
            share,
            coordinate,
            place_name: None,
            geocoder: None,
        }
    }

    pub fn with_place_name(mut self, place_name: Option<String>) -> Self {
        self.place_name = place_name;
        self
    }

    pub fn with_geocoder(mut self, geocoder: Option<NominatimGeocoder>) -> Self {
        self.geocoder = geocoder;
        self
    }

    pub fn from_config(config: &LocationConfig, user_agent: &str) -> Self {
        let geocoder = if config.reverse_geocode {
            NominatimGeocoder::new(NOMINATIM_URL, user_agent)
                .inspect_err(|e| tracing::warn!("Failed to create geocoding client: {e}"))
                .ok()
        } else {
            None
        };

        Self::new(config.share, config.coordinate())
            .with_place_name(config.place_name.clone())
            .with_geocoder(geocoder)
    }
}

#[async_trait]
impl LocationProvider for ConfiguredLocation {
    async fn request_permission(&self) -> Permission {
        if self.share {
            Permission::Granted
        } else {
            Permission::Denied
        }
    }

    async fn current_coordinate(&self) -> Result<Coordinate, UvError> {
        self.coordinate.ok_or_else(|| {
            UvError::Position(
                "no coordinates configured. Hint: run `uvcheck configure` or pass --lat/--lon"
                    .to_string(),
            )
        })
    }

    async fn reverse_geocode(&self, coordinate: Coordinate) -> Option<String> {
        if let Some(name) = &self.place_name {
            return Some(name.clone());
        }
        match &self.geocoder {
            Some(geocoder) => geocoder.reverse(coordinate).await,
            None => None,
        }
    }
}

/// Reverse geocoding through OpenStreetMap Nominatim. No API key needed.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
}

impl NominatimAddress {
    fn place_name(self) -> String {
        let named = |s: Option<String>| s.filter(|s| !s.trim().is_empty());

        named(self.city)
            .or_else(|| named(self.town))
            .or_else(|| named(self.village))
            .or_else(|| named(self.state))
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

impl NominatimGeocoder {
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Result<Self, UvError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(GEOCODE_TIMEOUT_SECS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    /// Returns `None` on any failure; the caller falls back to showing
    /// coordinates only.
    pub async fn reverse(&self, coordinate: Coordinate) -> Option<String> {
        let lat = coordinate.latitude.to_string();
        let lon = coordinate.longitude.to_string();

        let response = match self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("format", "json"),
                ("zoom", "10"),
            ])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Reverse geocode request failed: {e}");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Reverse geocode returned status {}", response.status());
            return None;
        }

        let body: NominatimResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("Reverse geocode parse error: {e}");
                return None;
            }
        };

        let place = body.address?.place_name();
        tracing::info!("Reverse geocoded to: {place}");
        Some(place)
    }
}
