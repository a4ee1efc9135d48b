//! Weather and reverse-geocoding clients for Skycast.
//!
//! Weather comes from the Visual Crossing timeline API, place names from a
//! Nominatim server. Device position is abstracted behind [`Geolocator`].

pub mod geocode;
pub mod location;
pub mod provider;
pub mod types;

pub use geocode::GeocodeClient;
pub use location::{Geolocator, StaticGeolocator};
pub use provider::WeatherClient;
pub use types::{to_fixed, Coordinates, LocationQuery};
