use serde::{Deserialize, Serialize};

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// "lat,lon" form accepted by the weather provider as a location.
    pub fn to_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Placeholder name used when reverse geocoding fails.
    pub fn fallback_name(&self) -> String {
        format!(
            "Location near {}, {}",
            to_fixed(self.latitude, 2),
            to_fixed(self.longitude, 2)
        )
    }
}

/// Fixed-point text with ties rounded away from zero (`2.5` -> `"3"`).
/// `format!("{:.N}")` rounds ties to even instead.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return format!("{:.*}", digits, 0.0);
    }
    let scale = 10f64.powi(digits as i32);
    let rounded = (value * scale).round() / scale;
    format!("{:.*}", digits, rounded)
}

/// What a single search looks up.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// Free text typed by the user ("Paris", "10001", ...)
    Text(String),
    /// Device position; needs reverse geocoding for a display name
    Coordinates(Coordinates),
}

impl LocationQuery {
    /// The string sent to the weather provider.
    pub fn provider_location(&self) -> String {
        match self {
            LocationQuery::Text(text) => text.clone(),
            LocationQuery::Coordinates(coords) => coords.to_query(),
        }
    }
}
