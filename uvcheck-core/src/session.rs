use crate::{
    error::UvError,
    location::{LocationProvider, Permission},
    model::{Coordinate, Summary},
    provider::WeatherDataSource,
    state::{AppState, Event},
    summary::summarize,
};

/// Runs permission → position → reverse-geocode → fetch → reduce and keeps
/// the resulting display state.
#[derive(Debug)]
pub struct Session<L, S> {
    location: L,
    source: S,
    state: AppState,
    denied: bool,
}

impl<L: LocationProvider, S: WeatherDataSource> Session<L, S> {
    pub fn new(location: L, source: S) -> Self {
        Self {
            location,
            source,
            state: AppState::default(),
            denied: false,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn dispatch(&mut self, event: Event) {
        self.state = std::mem::take(&mut self.state).apply(event);
    }

    /// Resolve the location once and, if that worked, fetch the forecast.
    pub async fn start(&mut self) -> Result<(), UvError> {
        self.resolve_location().await?;
        self.refresh().await
    }

    pub async fn resolve_location(&mut self) -> Result<Coordinate, UvError> {
        match locate(&self.location).await {
            Ok((coordinate, place_name)) => {
                self.dispatch(Event::LocationResolved {
                    coordinate,
                    place_name,
                });
                Ok(coordinate)
            }
            Err(error) => {
                tracing::warn!("location lookup failed: {error}");
                self.denied = matches!(error, UvError::PermissionDenied);
                self.dispatch(Event::location_failed(&error));
                Err(error)
            }
        }
    }

    /// Fetch again for the last known coordinate. Failures are already
    /// reflected in [`Session::state`] when this returns `Err`.
    ///
    /// Once location access has been denied the session stays denied: this
    /// returns [`UvError::PermissionDenied`] without touching the state.
    pub async fn refresh(&mut self) -> Result<(), UvError> {
        if self.denied {
            return Err(UvError::PermissionDenied);
        }

        let (state, ticket) = std::mem::take(&mut self.state).request_refresh();
        self.state = state;

        let Some(ticket) = ticket else {
            return Err(UvError::Position("no known location to refresh".into()));
        };

        match fetch_summary(&self.source, ticket.coordinate).await {
            Ok(summary) => {
                tracing::info!(peak_uv = summary.peak_uv, "forecast updated");
                self.dispatch(Event::FetchSucceeded {
                    seq: ticket.seq,
                    summary,
                });
                Ok(())
            }
            Err(error) => {
                self.dispatch(Event::fetch_failed(ticket.seq, &error));
                Err(error)
            }
        }
    }
}

async fn locate<L: LocationProvider>(
    location: &L,
) -> Result<(Coordinate, Option<String>), UvError> {
    if location.request_permission().await == Permission::Denied {
        return Err(UvError::PermissionDenied);
    }
    let coordinate = location.current_coordinate().await?;
    let place_name = location.reverse_geocode(coordinate).await;
    Ok((coordinate, place_name))
}

/// Fetch a series for `coordinate` and reduce it.
pub async fn fetch_summary<S: WeatherDataSource + ?Sized>(
    source: &S,
    coordinate: Coordinate,
) -> Result<Summary, UvError> {
    let series = source.fetch_series(coordinate).await?;
    summarize(&series)
}
