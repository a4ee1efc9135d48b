//! Search flow: input or device position in, rendered weather or an error
//! banner out.
//!
//! ```text
//! Idle/Success/Error --search--> Loading --ok--> Success
//!                                        \--err-> Error
//! empty input ------------------------------------> Error (no Loading)
//! startup without geolocation -------------------> unchanged
//! ```

use parking_lot::Mutex;
use skycast_core::SearchError;
use skycast_weather::{GeocodeClient, Geolocator, LocationQuery, WeatherClient};

use crate::display::DisplayWeather;
use crate::view::WeatherView;

/// Where the widget is in its lookup cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

pub struct SearchOrchestrator<V, G> {
    weather: WeatherClient,
    geocoder: GeocodeClient,
    geolocator: G,
    view: V,
    state: Mutex<UiState>,
}

impl<V: WeatherView, G: Geolocator> SearchOrchestrator<V, G> {
    pub fn new(weather: WeatherClient, geocoder: GeocodeClient, geolocator: G, view: V) -> Self {
        Self {
            weather,
            geocoder,
            geolocator,
            view,
            state: Mutex::new(UiState::Idle),
        }
    }

    pub fn state(&self) -> UiState {
        *self.state.lock()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Manual search using whatever is in the view's location input.
    pub async fn search(&self) -> UiState {
        self.view.clear_error();
        let input = self.view.input_location();
        let location = input.trim();

        if location.is_empty() {
            return self.fail(&SearchError::EmptyInput);
        }

        self.begin_loading();
        let outcome = self.lookup(LocationQuery::Text(location.to_string())).await;
        self.finish(outcome)
    }

    /// Startup lookup from the device position.
    ///
    /// Devices without geolocation stay in their current state without an
    /// error; the user can still search manually.
    pub async fn start(&self) -> UiState {
        if !self.geolocator.is_available() {
            tracing::info!("Geolocation unavailable; waiting for a manual search");
            return self.state();
        }

        self.view.clear_error();
        self.begin_loading();
        let outcome = match self.geolocator.current_position().await {
            Ok(coords) => self.lookup(LocationQuery::Coordinates(coords)).await,
            Err(e) => Err(SearchError::from(e)),
        };
        self.finish(outcome)
    }

    async fn lookup(&self, query: LocationQuery) -> Result<DisplayWeather, SearchError> {
        // Geocoding never fails; worst case it names the coordinates.
        let place = match &query {
            LocationQuery::Coordinates(coords) => Some(self.geocoder.place_name(*coords).await),
            LocationQuery::Text(_) => None,
        };

        let raw = self.weather.fetch(&query.provider_location()).await?;
        let mut weather = DisplayWeather::from_provider(&raw)?;
        if let Some(place) = place {
            weather.location = place;
        }
        Ok(weather)
    }

    fn begin_loading(&self) {
        self.view.show_loading();
        self.set_state(UiState::Loading);
    }

    fn finish(&self, outcome: Result<DisplayWeather, SearchError>) -> UiState {
        self.view.hide_loading();
        match outcome {
            Ok(weather) => {
                tracing::info!("Weather ready for {}", weather.location);
                self.view.update_weather(&weather);
                self.set_state(UiState::Success)
            }
            Err(e) => self.fail(&e),
        }
    }

    fn fail(&self, error: &SearchError) -> UiState {
        match error {
            SearchError::EmptyInput => tracing::debug!("Search with empty input"),
            other => tracing::warn!("Error during weather search: {}", other),
        }
        self.view.display_error(&error.user_message());
        self.set_state(UiState::Error)
    }

    fn set_state(&self, next: UiState) -> UiState {
        let mut state = self.state.lock();
        tracing::debug!("UI state {:?} -> {:?}", *state, next);
        *state = next;
        next
    }
}
