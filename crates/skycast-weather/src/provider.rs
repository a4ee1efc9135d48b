//! Visual Crossing timeline client.
//!
//! Returns the provider payload untouched; shaping it for display happens in
//! the UI layer.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use skycast_core::{ReqwestErrorExt, WeatherConfig, WeatherError};
use std::time::Duration;
use tracing::instrument;

const UNIT_GROUP: &str = "metric";
const CONTENT_TYPE: &str = "json";

/// Error body the provider sends alongside 4xx/5xx responses.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: Option<String>,
}

#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder.build().map_err(ReqwestErrorExt::into_network_error)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fetch current conditions for `location` (place name, postcode or "lat,lon").
    ///
    /// Non-2xx answers become [`WeatherError::Provider`] with the provider's
    /// `message` when it sent one, otherwise the HTTP reason phrase.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, location: &str) -> Result<Value, WeatherError> {
        let url = format!("{}/{}", self.base_url, urlencoding::encode(location));
        tracing::info!("Fetching weather data for: {}", location);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("unitGroup", UNIT_GROUP),
                ("key", self.api_key.as_str()),
                ("contentType", CONTENT_TYPE),
            ])
            .send()
            .await
            .map_err(ReqwestErrorExt::into_network_error)?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown Status").to_string();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(reason);

            tracing::warn!(status = status.as_u16(), "Weather provider error: {}", message);
            return Err(WeatherError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let data: Value = response
            .json()
            .await
            .map_err(ReqwestErrorExt::into_network_error)?;
        tracing::debug!("Weather data received for {}", location);
        Ok(data)
    }
}
