//! Display state and the events that move it forward.
//!
//! The record is never mutated in place: every transition consumes the old
//! state and returns the next one. Fetch results carry the sequence number of
//! the refresh that started them, and only the most recently issued one is
//! applied, so a slow response can't overwrite a newer one.

use crate::{
    error::{DATA_ERROR_MESSAGE, UvError},
    model::{Coordinate, Summary},
};

#[derive(Debug)]
pub enum Event {
    LocationResolved {
        coordinate: Coordinate,
        place_name: Option<String>,
    },
    LocationFailed { reason: String },
    RefreshRequested,
    FetchSucceeded { seq: u64, summary: Summary },
    FetchFailed { seq: u64, reason: String },
}

impl Event {
    pub fn location_failed(error: &UvError) -> Self {
        Event::LocationFailed {
            reason: error.to_string(),
        }
    }

    pub fn fetch_failed(seq: u64, error: &UvError) -> Self {
        Event::FetchFailed {
            seq,
            reason: error.to_string(),
        }
    }
}

/// Handed out for each refresh; the fetch result must echo `seq` back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefreshTicket {
    pub seq: u64,
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub place_name: Option<String>,
    pub coordinate: Option<Coordinate>,
    pub summary: Option<Summary>,
    pub location_error: Option<String>,
    pub data_error: Option<String>,
    issued: u64,
}

impl AppState {
    /// Sequence number of the most recent refresh.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    pub fn apply(self, event: Event) -> AppState {
        match event {
            Event::LocationResolved {
                coordinate,
                place_name,
            } => AppState {
                coordinate: Some(coordinate),
                place_name,
                location_error: None,
                ..self
            },
            Event::LocationFailed { reason } => AppState {
                location_error: Some(reason),
                data_error: Some(DATA_ERROR_MESSAGE.to_string()),
                ..self
            },
            Event::RefreshRequested => {
                let issued = self.issued + 1;
                match self.coordinate {
                    Some(_) => AppState { issued, ..self },
                    None => AppState {
                        issued,
                        data_error: Some(DATA_ERROR_MESSAGE.to_string()),
                        ..self
                    },
                }
            }
            Event::FetchSucceeded { seq, summary } => {
                if seq != self.issued {
                    tracing::debug!(seq, issued = self.issued, "discarding stale forecast");
                    return self;
                }
                AppState {
                    summary: Some(summary),
                    data_error: None,
                    ..self
                }
            }
            Event::FetchFailed { seq, reason } => {
                if seq != self.issued {
                    tracing::debug!(seq, issued = self.issued, "discarding stale fetch error");
                    return self;
                }
                tracing::warn!("forecast fetch failed: {reason}");
                AppState {
                    data_error: Some(DATA_ERROR_MESSAGE.to_string()),
                    ..self
                }
            }
        }
    }

    /// Issue a new refresh. A ticket is only returned when there is a
    /// coordinate to fetch for.
    pub fn request_refresh(self) -> (AppState, Option<RefreshTicket>) {
        let next = self.apply(Event::RefreshRequested);
        let ticket = next.coordinate.map(|coordinate| RefreshTicket {
            seq: next.issued,
            coordinate,
        });
        (next, ticket)
    }
}
