pub mod config;
pub mod error;

pub use config::{Config, GeocodeConfig, LocationConfig, ValidationResult, WeatherConfig};
pub use error::{
    ConfigError, LocationError, NetworkError, ReqwestErrorExt, SearchError, WeatherError,
};

use anyhow::Result;

/// Initialize logging for the application.
///
/// Logs go to stderr so stdout only carries rendered weather output.
/// `RUST_LOG` overrides the default `warn` filter.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("Skycast core initialized");
    Ok(())
}
