use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{model::Coordinate, provider::metno::DEFAULT_ENDPOINT};

pub const DEFAULT_USER_AGENT: &str = concat!(
    "uvcheck/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/uvcheck/uvcheck)"
);
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where forecasts are fetched from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// The user's location and whether they agreed to share it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub share: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub place_name: Option<String>,
    pub reverse_geocode: bool,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            share: true,
            latitude: None,
            longitude: None,
            place_name: None,
            reverse_geocode: true,
        }
    }
}

impl LocationConfig {
    /// Both halves must be set for a coordinate to exist.
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.latitude?, self.longitude?))
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [forecast]
/// timeout_secs = 10
///
/// [location]
/// latitude = 59.91
/// longitude = 10.75
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub forecast: ForecastConfig,
    pub location: LocationConfig,
}

impl Config {
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.location.coordinate()
    }

    /// Store a location after checking that it is on the globe.
    pub fn set_location(
        &mut self,
        latitude: f64,
        longitude: f64,
        place_name: Option<String>,
    ) -> Result<()> {
        validate_coordinate(latitude, longitude)?;

        self.location.latitude = Some(latitude);
        self.location.longitude = Some(longitude);
        self.location.place_name = place_name.filter(|s| !s.trim().is_empty());
        Ok(())
    }

    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "uvcheck", "uvcheck")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

pub fn validate_coordinate(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        bail!("Latitude {latitude} is out of range (-90..=90)");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        bail!("Longitude {longitude} is out of range (-180..=180)");
    }
    Ok(())
}
