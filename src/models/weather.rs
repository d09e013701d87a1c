//! Weather observation model supplied by the external weather source

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Condition descriptor from the fixed set reported by the weather source
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherCondition {
    Clear,
    Rain,
    Snow,
    ExtremeHeat,
    ExtremeCold,
    Overcast,
}

impl WeatherCondition {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "clear",
            WeatherCondition::Rain => "rain",
            WeatherCondition::Snow => "snow",
            WeatherCondition::ExtremeHeat => "extreme-heat",
            WeatherCondition::ExtremeCold => "extreme-cold",
            WeatherCondition::Overcast => "overcast",
        }
    }
}

/// A single current-weather observation for a city
///
/// Materialized by the weather collaborator before classification; never
/// persisted by the engine.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeatherObservation {
    /// City the observation was taken for
    pub city: String,
    /// Condition descriptor; `None` when the source reported a descriptor
    /// outside the known set, or none at all
    pub condition: Option<WeatherCondition>,
    /// Temperature in degrees Fahrenheit
    pub temperature_f: Option<f32>,
    /// Timestamp for this weather observation
    pub observed_at: DateTime<Utc>,
}

impl WeatherObservation {
    /// Create an observation stamped with the current time
    #[must_use]
    pub fn new(
        city: String,
        condition: Option<WeatherCondition>,
        temperature_f: Option<f32>,
    ) -> Self {
        Self {
            city,
            condition,
            temperature_f,
            observed_at: Utc::now(),
        }
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        match self.temperature_f {
            Some(t) => format!("{t:.1}°F"),
            None => "unknown".to_string(),
        }
    }
}
