//! Reverse geocoding: convert coordinates to human-readable place names.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.
//!
//! Lookups never fail from the caller's point of view: a broken geocoder
//! must not keep weather off the screen, so every error collapses into a
//! coordinate-based fallback name.

use reqwest::Client;
use serde::Deserialize;
use skycast_core::{GeocodeConfig, ReqwestErrorExt, WeatherError};
use std::time::Duration;
use tracing::instrument;

use crate::types::Coordinates;

/// Returned when the server answers but has no name for the point.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    display_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    zoom: u8,
}

impl GeocodeClient {
    pub fn new(config: &GeocodeConfig, timeout_secs: u64) -> Result<Self, WeatherError> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        let client = builder.build().map_err(ReqwestErrorExt::into_network_error)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            zoom: config.zoom,
        })
    }

    /// Reverse geocode `coords` to a display name.
    ///
    /// Falls back to "Location near {lat}, {lon}" on any failure.
    #[instrument(skip(self), level = "info")]
    pub async fn place_name(&self, coords: Coordinates) -> String {
        match self.lookup(coords).await {
            Ok(name) => {
                tracing::info!("Reverse geocoded to: {}", name);
                name
            }
            Err(e) => {
                tracing::warn!("Failed to get named location: {}", e);
                coords.fallback_name()
            }
        }
    }

    async fn lookup(&self, coords: Coordinates) -> Result<String, WeatherError> {
        let url = format!("{}/reverse", self.base_url);
        let zoom = self.zoom.to_string();
        let lat = coords.latitude.to_string();
        let lon = coords.longitude.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json"),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("zoom", zoom.as_str()),
                ("addressdetails", "1"),
            ])
            .send()
            .await
            .map_err(ReqwestErrorExt::into_network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Provider {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            });
        }

        let body: NominatimResponse = response
            .json()
            .await
            .map_err(ReqwestErrorExt::into_network_error)?;

        Ok(body
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()))
    }
}
