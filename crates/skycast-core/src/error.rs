//! Centralized error types for Skycast.
//!
//! Each search failure maps to exactly one message shown in the error
//! banner. `SearchError::user_message()` is the single place those strings
//! are produced.

use thiserror::Error;

/// Network-related errors (connectivity, DNS, TLS, timeouts).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors raised by the weather provider client.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The provider answered with a non-success HTTP status.
    #[error("API Error: {status} {message}")]
    Provider { status: u16, message: String },
}

impl WeatherError {
    /// HTTP status for provider errors, `None` for transport failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            WeatherError::Provider { status, .. } => Some(*status),
            WeatherError::Network(_) => None,
        }
    }
}

/// Device geolocation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location position unavailable")]
    PositionUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::MissingSetting(_) => "A required setting is missing. Check your settings.",
        }
    }
}

/// Everything that can end a search in the error state.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Please enter a location.")]
    EmptyInput,

    #[error("Failed to get weather: {0}")]
    Weather(#[from] WeatherError),

    /// The provider payload lacked fields the display needs.
    #[error("Invalid weather data received from API: {0}")]
    Validation(String),

    #[error(transparent)]
    Location(#[from] LocationError),
}

impl SearchError {
    /// The message rendered in the error banner.
    pub fn user_message(&self) -> String {
        match self {
            SearchError::EmptyInput => "Please enter a location.".to_string(),
            SearchError::Weather(e) => format!("Failed to get weather: {}", e),
            SearchError::Validation(_) => {
                "Failed to get weather: Invalid weather data received from API.".to_string()
            }
            SearchError::Location(LocationError::PermissionDenied) => {
                "Location permission denied. Please enter a location manually.".to_string()
            }
            SearchError::Location(_) => {
                "Unable to determine your location. Please enter a location manually.".to_string()
            }
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        // The request URL carries the API key in its query string.
        let err = self.without_url();
        let cause = describe(&err);
        if err.is_timeout() {
            NetworkError::Timeout(cause)
        } else if err.is_decode() {
            NetworkError::InvalidResponse(cause)
        } else {
            NetworkError::ConnectionFailed(cause)
        }
    }
}

/// reqwest hides the interesting part (DNS, refused, TLS) in the source chain.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}
