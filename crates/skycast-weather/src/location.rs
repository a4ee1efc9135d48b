//! Device position sources.

use skycast_core::{LocationConfig, LocationError};

use crate::types::Coordinates;

/// One-shot source of the device's position.
///
/// The returned future is not required to be `Send`; the orchestrator
/// awaits it on the caller's task.
#[allow(async_fn_in_trait)]
pub trait Geolocator {
    /// Whether this device can report a position at all.
    /// When false, startup lookups are skipped without showing an error.
    fn is_available(&self) -> bool;

    /// Request the current position once.
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Position fixed ahead of time (config file or command line).
#[derive(Debug, Clone, Default)]
pub struct StaticGeolocator {
    position: Option<Coordinates>,
}

impl StaticGeolocator {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }

    pub fn from_config(config: &LocationConfig) -> Self {
        Self::new(
            config
                .coordinates()
                .map(|(lat, lon)| Coordinates::new(lat, lon)),
        )
    }
}

impl Geolocator for StaticGeolocator {
    fn is_available(&self) -> bool {
        self.position.is_some()
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        self.position.ok_or(LocationError::PositionUnavailable)
    }
}
