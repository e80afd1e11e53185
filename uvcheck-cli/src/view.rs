//! Text rendering of the display state.

use std::fmt;

use crossterm::style::{Color, Stylize};
use uvcheck_core::{AppState, classify};

/// Whether to style the severity text with its band color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Ansi,
    Plain,
}

/// One screenful of [`AppState`], printed through [`fmt::Display`].
#[derive(Debug)]
pub struct View<'a> {
    state: &'a AppState,
    mode: ColorMode,
}

impl<'a> View<'a> {
    pub fn new(state: &'a AppState, mode: ColorMode) -> Self {
        Self { state, mode }
    }

    fn uv_line(
        &self,
        f: &mut fmt::Formatter<'_>,
        label: &str,
        value: Option<f64>,
    ) -> fmt::Result {
        let severity = classify(value);
        let text = format!("{} ({severity})", or_dash(value));

        match self.mode {
            ColorMode::Plain => writeln!(f, "{label}: {text}"),
            ColorMode::Ansi => {
                let (r, g, b) = severity.rgb();
                writeln!(f, "{label}: {}", text.with(Color::Rgb { r, g, b }).bold())
            }
        }
    }
}

fn or_dash(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state;

        writeln!(f, "UV CHECK")?;
        if let Some(err) = &state.location_error {
            writeln!(f, "error: {err}")?;
        }
        if let Some(err) = &state.data_error {
            writeln!(f, "error: {err}")?;
        }

        let place = state.place_name.as_deref().unwrap_or("-");
        writeln!(f, "Showing UV for: {place}")?;

        match state.coordinate {
            Some(c) => {
                writeln!(f, "Latitude: {:.2}", c.latitude)?;
                writeln!(f, "Longitude: {:.2}", c.longitude)?;
            }
            None => writeln!(f, "Locating...")?,
        }

        let Some(summary) = &state.summary else {
            return Ok(());
        };

        self.uv_line(f, "Peak UV", Some(summary.peak_uv))?;
        self.uv_line(f, "Latest UV", summary.latest.ultraviolet_index_clear_sky)?;
        if let Some(t) = summary.latest.air_temperature {
            writeln!(f, "Temperature: {t} °C")?;
        }
        if let Some(time) = summary.latest_time {
            writeln!(f, "Forecast for: {}", time.format("%Y-%m-%d %H:%M UTC"))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uvcheck_core::{Coordinate, Event, InstantDetails, Severity, Summary, UvError};

    fn with_summary(latest_uv: Option<f64>, peak_uv: f64) -> AppState {
        let (state, ticket) = AppState::default()
            .apply(Event::LocationResolved {
                coordinate: Coordinate::new(59.9139, 10.7522),
                place_name: Some("Oslo".into()),
            })
            .request_refresh();
        let seq = ticket.expect("ticket").seq;
        state.apply(Event::FetchSucceeded {
            seq,
            summary: Summary {
                latest: InstantDetails {
                    ultraviolet_index_clear_sky: latest_uv,
                    air_temperature: Some(21.5),
                    ..Default::default()
                },
                peak_uv,
                latest_time: Some(Utc.with_ymd_and_hms(2026, 6, 21, 9, 0, 0).unwrap()),
            },
        })
    }

    fn plain(state: &AppState) -> String {
        View::new(state, ColorMode::Plain).to_string()
    }

    #[test]
    fn renders_summary_with_two_decimal_coordinates() {
        let out = plain(&with_summary(Some(3.0), 8.0));

        assert!(out.starts_with("UV CHECK\n"));
        assert!(out.contains("Showing UV for: Oslo"));
        assert!(out.contains("Latitude: 59.91\n"));
        assert!(out.contains("Longitude: 10.75\n"));
        assert!(out.contains("Peak UV: 8 (very high)"));
        assert!(out.contains("Latest UV: 3 (moderate)"));
        assert!(out.contains("Temperature: 21.5 °C"));
        assert!(out.contains("Forecast for: 2026-06-21 09:00 UTC"));
        assert!(!out.contains("error:"));
    }

    #[test]
    fn missing_latest_uv_is_unknown() {
        let out = plain(&with_summary(None, 0.0));
        assert!(out.contains("Latest UV: - (unknown)"));
        assert!(out.contains("Peak UV: 0 (low)"));
    }

    #[test]
    fn unreadable_forecast_time_is_left_out() {
        let mut state = with_summary(Some(2.0), 2.0);
        if let Some(summary) = state.summary.as_mut() {
            summary.latest_time = None;
        }

        let out = plain(&state);
        assert!(out.contains("Peak UV: 2 (low)"));
        assert!(!out.contains("Forecast for"));
    }

    #[test]
    fn ansi_mode_uses_severity_color() {
        let state = with_summary(Some(1.0), 1.0);
        let (r, g, b) = Severity::Low.rgb();
        let low = "1 (low)".with(Color::Rgb { r, g, b }).bold();

        let out = View::new(&state, ColorMode::Ansi).to_string();
        assert!(out.contains(&format!("Peak UV: {low}\n")));
        assert!(out.contains(&format!("Latest UV: {low}\n")));
        assert_ne!(out, plain(&state));
    }

    #[test]
    fn shows_both_errors_and_locating_placeholder() {
        let denied = Event::location_failed(&UvError::PermissionDenied);
        let out = plain(&AppState::default().apply(denied));

        assert!(out.contains("error: Permission to access location was denied"));
        assert!(out.contains("error: Failed to get weather data"));
        assert!(out.contains("Locating..."));
        assert!(!out.contains("Peak UV"));
    }
}
