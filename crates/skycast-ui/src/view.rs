//! UI surface the orchestrator drives.

use parking_lot::Mutex;
use std::io::Write;

use crate::display::DisplayWeather;

/// Everything the search flow needs from a UI.
///
/// Methods take `&self`; implementations that keep state use interior
/// mutability so a view can be shared between overlapping searches.
pub trait WeatherView {
    /// Current contents of the location input (untrimmed).
    fn input_location(&self) -> String;

    /// Show the loading indicator, disable the search trigger and hide any
    /// previously rendered weather.
    fn show_loading(&self);

    /// Hide the loading indicator and re-enable the search trigger.
    fn hide_loading(&self);

    /// Show `message` in the error banner and hide the weather panel.
    fn display_error(&self, message: &str);

    fn clear_error(&self);

    /// Render a successful lookup.
    fn update_weather(&self, weather: &DisplayWeather);
}

/// Line-oriented view for the command line.
///
/// Weather goes to `out`, loading and error text to `err`.
pub struct TerminalView<O: Write, E: Write> {
    input: String,
    out: Mutex<O>,
    err: Mutex<E>,
}

impl TerminalView<std::io::Stdout, std::io::Stderr> {
    pub fn stdio(input: impl Into<String>) -> Self {
        Self::new(input, std::io::stdout(), std::io::stderr())
    }
}

impl<O: Write, E: Write> TerminalView<O, E> {
    pub fn new(input: impl Into<String>, out: O, err: E) -> Self {
        Self {
            input: input.into(),
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    /// Give back the writers, e.g. to inspect captured output.
    pub fn into_inner(self) -> (O, E) {
        (self.out.into_inner(), self.err.into_inner())
    }

    fn write_err(&self, text: &str) {
        if let Err(e) = writeln!(self.err.lock(), "{}", text) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<O: Write, E: Write> WeatherView for TerminalView<O, E> {
    fn input_location(&self) -> String {
        self.input.clone()
    }

    fn show_loading(&self) {
        self.write_err("Loading...");
    }

    fn hide_loading(&self) {}

    fn display_error(&self, message: &str) {
        self.write_err(&format!("Error: {}", message));
    }

    fn clear_error(&self) {}

    fn update_weather(&self, weather: &DisplayWeather) {
        let mut out = self.out.lock();
        let mut result = weather
            .lines()
            .iter()
            .try_for_each(|line| writeln!(out, "{}", line));
        if result.is_ok() {
            if let Some(at) = weather.observed_at_utc() {
                result = writeln!(out, "Observed: {}", at.format("%Y-%m-%d %H:%M UTC"));
            }
        }
        if let Err(e) = result {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}
