use std::io::IsTerminal;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, InquireError, Text};
use uvcheck_core::{
    Config, ConfiguredLocation, Session, config::validate_coordinate, provider::source_from_config,
};

use crate::view::{ColorMode, View};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "uvcheck", version, about = "Current and peak UV index for your location")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store your location and sharing preference.
    Configure,

    /// Show the latest and peak UV index.
    Show {
        /// Latitude in decimal degrees; overrides the configured location.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude in decimal degrees; overrides the configured location.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Place name to display instead of a reverse-geocoded one.
        #[arg(long)]
        place: Option<String>,

        /// Print the summary as JSON.
        #[arg(long, conflicts_with = "watch")]
        json: bool,

        /// Keep offering to refresh until declined.
        #[arg(long)]
        watch: bool,

        /// Disable colored output.
        #[arg(long)]
        no_color: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                lat,
                lon,
                place,
                json,
                watch,
                no_color,
            } => {
                let mut config = Config::load()?;
                if let (Some(lat), Some(lon)) = (lat, lon) {
                    config.set_location(lat, lon, place)?;
                } else if place.is_some() {
                    config.location.place_name = place;
                }

                let color = if no_color || json || !std::io::stdout().is_terminal() {
                    ColorMode::Plain
                } else {
                    ColorMode::Ansi
                };

                show(&config, json, watch, color).await
            }
        }
    }
}

async fn show(config: &Config, json: bool, watch: bool, color: ColorMode) -> anyhow::Result<()> {
    let location = ConfiguredLocation::from_config(&config.location, &config.forecast.user_agent);
    let source =
        source_from_config(config).context("Failed to set up forecast client")?;
    let mut session = Session::new(location, source);

    if let Err(e) = session.start().await {
        tracing::debug!("initial fetch did not complete: {e}");
    }

    if json {
        let out = serde_json::to_string_pretty(&session.state().summary)
            .context("Failed to serialize summary")?;
        println!("{out}");

        let state = session.state();
        for err in [&state.location_error, &state.data_error]
            .into_iter()
            .flatten()
        {
            eprintln!("error: {err}");
        }
        return Ok(());
    }

    print!("{}", View::new(session.state(), color));

    while watch {
        match Confirm::new("Refresh?").with_default(true).prompt() {
            Ok(true) => {}
            Ok(false) | Err(InquireError::OperationCanceled) => break,
            Err(InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        }

        if let Err(e) = session.refresh().await {
            tracing::debug!("refresh did not complete: {e}");
        }
        println!();
        print!("{}", View::new(session.state(), color));
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let share = Confirm::new("Allow uvcheck to use your location?")
        .with_default(config.location.share)
        .prompt()?;
    config.location.share = share;

    if share {
        let mut latitude = CustomType::<f64>::new("Latitude:")
            .with_help_message("Decimal degrees, -90 to 90");
        if let Some(current) = config.location.latitude {
            latitude = latitude.with_default(current);
        }
        let latitude = latitude.prompt()?;

        let mut longitude = CustomType::<f64>::new("Longitude:")
            .with_help_message("Decimal degrees, -180 to 180");
        if let Some(current) = config.location.longitude {
            longitude = longitude.with_default(current);
        }
        let longitude = longitude.prompt()?;

        validate_coordinate(latitude, longitude)?;

        let place = Text::new("Place name (leave empty to look it up):")
            .with_initial_value(config.location.place_name.as_deref().unwrap_or_default())
            .prompt()?;

        config.set_location(latitude, longitude, Some(place))?;

        if config.location.place_name.is_none() {
            config.location.reverse_geocode = Confirm::new("Look up the place name online?")
                .with_default(config.location.reverse_geocode)
                .prompt()?;
        }
    }

    config.save()?;
    let path = Config::config_file_path()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
