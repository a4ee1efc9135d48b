//! Normalized, display-ready weather record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use skycast_core::SearchError;
use skycast_weather::to_fixed;

const NOT_AVAILABLE: &str = "N/A";

/// `currentConditions` as sent by the provider. Every field is optional;
/// absent values render as "N/A".
#[derive(Debug, Deserialize)]
struct RawConditions {
    temp: Option<f64>,
    conditions: Option<String>,
    icon: Option<String>,
    humidity: Option<f64>,
    windspeed: Option<f64>,
    #[serde(rename = "datetimeEpoch")]
    datetime_epoch: Option<i64>,
}

/// What the weather panel shows after a successful search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayWeather {
    /// Degrees Celsius
    pub temperature: Option<f64>,
    pub conditions: Option<String>,
    /// Provider icon id, e.g. "partly-cloudy-day"
    pub icon: Option<String>,
    /// Relative humidity, percent
    pub humidity: Option<f64>,
    /// km/h
    pub wind_speed: Option<f64>,
    pub location: String,
    /// Observation time, milliseconds since the Unix epoch
    pub observed_at: Option<i64>,
}

impl DisplayWeather {
    /// Shape a raw provider payload for display.
    ///
    /// Fails with [`SearchError::Validation`] when `currentConditions` or
    /// `resolvedAddress` is missing or of the wrong type.
    pub fn from_provider(raw: &Value) -> Result<Self, SearchError> {
        let current = raw
            .get("currentConditions")
            .filter(|c| c.is_object())
            .ok_or_else(|| SearchError::Validation("missing currentConditions".to_string()))?;

        let location = raw
            .get("resolvedAddress")
            .and_then(Value::as_str)
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| SearchError::Validation("missing resolvedAddress".to_string()))?;

        let conditions: RawConditions = serde_json::from_value(current.clone())
            .map_err(|e| SearchError::Validation(format!("malformed currentConditions: {}", e)))?;

        Ok(Self {
            temperature: conditions.temp,
            conditions: conditions.conditions,
            icon: conditions.icon,
            humidity: conditions.humidity,
            wind_speed: conditions.windspeed,
            location: location.to_string(),
            observed_at: conditions.datetime_epoch.and_then(|s| s.checked_mul(1000)),
        })
    }

    pub fn temperature_text(&self) -> String {
        self.temperature
            .map(|t| format!("{}°C", to_fixed(t, 1)))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn conditions_text(&self) -> String {
        self.conditions
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn humidity_text(&self) -> String {
        match self.humidity {
            Some(h) => format!("Humidity: {}%", to_fixed(h, 0)),
            None => format!("Humidity: {}", NOT_AVAILABLE),
        }
    }

    pub fn wind_text(&self) -> String {
        match self.wind_speed {
            Some(w) => format!("Wind: {} km/h", to_fixed(w, 1)),
            None => format!("Wind: {}", NOT_AVAILABLE),
        }
    }

    pub fn observed_at_utc(&self) -> Option<DateTime<Utc>> {
        self.observed_at.and_then(DateTime::from_timestamp_millis)
    }

    /// The weather panel, top to bottom.
    pub fn lines(&self) -> [String; 5] {
        [
            self.location.clone(),
            self.temperature_text(),
            self.conditions_text(),
            self.humidity_text(),
            self.wind_text(),
        ]
    }
}
