//! Search flow and presentation for Skycast.
//!
//! `SearchOrchestrator` drives one lookup at a time through an injected
//! `WeatherView`; the view owns every visible side effect.

pub mod display;
pub mod orchestrator;
pub mod view;

pub use display::DisplayWeather;
pub use orchestrator::{SearchOrchestrator, UiState};
pub use view::{TerminalView, WeatherView};
