use anyhow::Result;
use clap::Parser;
use skycast_core::{Config, ConfigError};
use skycast_ui::{SearchOrchestrator, TerminalView, UiState};
use skycast_weather::{Coordinates, GeocodeClient, StaticGeolocator, WeatherClient};
use std::path::PathBuf;
use std::process::ExitCode;

/// Current weather for a place name or your position
#[derive(Parser, Debug)]
#[command(name = "skycast", version)]
struct Args {
    /// Place to look up ("Paris", "10001", "Lisbon, Portugal").
    /// Omit to use the device position.
    location: Option<String>,

    /// Config file (default: <config dir>/skycast/config.toml)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Device latitude, overrides [location] in the config
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Device longitude, overrides [location] in the config
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    skycast_core::init()?;

    let (config, _warnings) = match Config::load_validated(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            if let Some(config_err) = e.downcast_ref::<ConfigError>() {
                eprintln!("{}", config_err.user_message());
            }
            return Err(e.context("Failed to load configuration"));
        }
    };

    tracing::debug!(location = ?args.location, "Configuration loaded");

    let weather = WeatherClient::new(&config.weather)?;
    let geocoder = GeocodeClient::new(&config.geocode, config.weather.timeout_secs)?;
    let geolocator = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => StaticGeolocator::new(Some(Coordinates::new(lat, lon))),
        _ => StaticGeolocator::from_config(&config.location),
    };

    let view = TerminalView::stdio(args.location.clone().unwrap_or_default());
    let orchestrator = SearchOrchestrator::new(weather, geocoder, geolocator, view);

    let state = match args.location {
        Some(_) => orchestrator.search().await,
        None => orchestrator.start().await,
    };

    let code = match state {
        UiState::Success => ExitCode::SUCCESS,
        UiState::Idle => {
            eprintln!("No location given and no device position configured.");
            eprintln!("Pass a place name, --lat/--lon, or set [location] in the config.");
            ExitCode::from(2)
        }
        UiState::Error | UiState::Loading => ExitCode::from(1),
    };
    Ok(code)
}
