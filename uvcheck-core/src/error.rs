use thiserror::Error;

/// Message shown for any failure on the forecast side of the pipeline.
pub const DATA_ERROR_MESSAGE: &str = "Failed to get weather data";

/// Everything that can go wrong between asking for a location and
/// producing a [`Summary`](crate::Summary).
#[derive(Debug, Error)]
pub enum UvError {
    #[error("Permission to access location was denied")]
    PermissionDenied,

    #[error("Could not determine current position: {0}")]
    Position(String),

    #[error("Failed to reach forecast service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Forecast request failed with status {status}: {body}")]
    Fetch { status: u16, body: String },

    #[error("Failed to decode forecast response: {0}")]
    Decode(String),

    #[error("Forecast response contained no timeseries entries")]
    EmptySeries,
}

impl UvError {
    /// True for errors raised while fetching or reducing forecast data,
    /// false for location errors.
    pub fn is_data_error(&self) -> bool {
        !matches!(self, UvError::PermissionDenied | UvError::Position(_))
    }
}
