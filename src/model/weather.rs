//! Weather report model

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Current weather conditions for the monitored location
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub location: String,
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: u32,
    /// Wind speed in meters per second
    pub wind_speed: f64,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    /// Present when the report is static fallback data rather than live data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl WeatherReport {
    /// Static fallback report used when no live data can be fetched
    pub fn fallback(location: &str, note: &str) -> Self {
        Self {
            location: location.to_string(),
            temperature: 23.5,
            humidity: 65,
            wind_speed: 3.2,
            description: "clear sky".to_string(),
            timestamp: Utc::now(),
            note: Some(note.to_string()),
        }
    }
}
