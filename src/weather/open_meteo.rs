//! Open-Meteo weather source client
//!
//! Resolves a city name through the Open-Meteo geocoding API, then fetches
//! current conditions. Any network or provider failure surfaces as
//! `WeatherUnavailable`; the engine never substitutes synthetic data.

use std::time::Duration;

use chrono::Utc;

use crate::config::WeatherConfig;
use crate::models::{WeatherCondition, WeatherObservation};
use crate::{Result, WeatherBitesError};

/// HTTP client for the Open-Meteo weather and geocoding APIs
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    geocoding_url: String,
}

impl WeatherClient {
    #[must_use]
    pub fn new(config: &WeatherConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: config.base_url.clone(),
            geocoding_url: config.geocoding_url.clone(),
        }
    }

    /// Fetch the current weather observation for a city
    #[tracing::instrument(skip(self))]
    pub async fn fetch_current_weather(&self, city: &str) -> Result<WeatherObservation> {
        let place = self.geocode(city).await?;

        let url = format!(
            "{}/forecast?latitude={}&longitude={}&current=temperature_2m,weather_code&temperature_unit=fahrenheit",
            self.base_url, place.latitude, place.longitude
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| WeatherBitesError::weather_unavailable(e.to_string()))?;

        let payload: response::ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherBitesError::weather_unavailable(e.to_string()))?;

        let current = payload.current.ok_or_else(|| {
            WeatherBitesError::weather_unavailable("provider response carried no current conditions")
        })?;

        let observed_at = chrono::NaiveDateTime::parse_from_str(&current.time, "%Y-%m-%dT%H:%M")
            .map_or_else(|_| Utc::now(), |dt| dt.and_utc());

        let observation = WeatherObservation {
            city: city.to_string(),
            condition: response::weather_code_to_condition(current.weather_code),
            temperature_f: Some(current.temperature),
            observed_at,
        };

        tracing::debug!(
            temperature = %observation.format_temperature(),
            "Fetched current weather for {city}"
        );
        Ok(observation)
    }

    /// Resolve a city name to coordinates via the geocoding API
    async fn geocode(&self, city: &str) -> Result<response::GeocodingResult> {
        let url = format!(
            "{}/search?name={}&count=1&language=en&format=json",
            self.geocoding_url,
            urlencoding::encode(city)
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| WeatherBitesError::weather_unavailable(e.to_string()))?;

        let payload: response::GeocodingResponse = response
            .json()
            .await
            .map_err(|e| WeatherBitesError::weather_unavailable(e.to_string()))?;

        payload
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| {
                WeatherBitesError::weather_unavailable(format!(
                    "geocoder returned no results for '{city}'"
                ))
            })
    }
}

/// Open-Meteo API response structures and conversion utilities
mod response {
    use serde::Deserialize;

    use crate::models::WeatherCondition;

    /// Current-conditions response from the forecast endpoint
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub current: Option<CurrentData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentData {
        pub time: String,
        #[serde(rename = "temperature_2m")]
        pub temperature: f32,
        #[serde(rename = "weather_code")]
        pub weather_code: u8,
    }

    /// Geocoding response
    #[derive(Debug, Deserialize)]
    pub struct GeocodingResponse {
        pub results: Option<Vec<GeocodingResult>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResult {
        pub name: String,
        pub latitude: f64,
        pub longitude: f64,
        pub country: Option<String>,
    }

    /// Map an Open-Meteo weather code onto the condition set
    ///
    /// Codes outside the mapped ranges become `None`; the classifier still
    /// succeeds on temperature alone.
    #[must_use]
    pub fn weather_code_to_condition(code: u8) -> Option<WeatherCondition> {
        match code {
            0..=2 => Some(WeatherCondition::Clear),
            3 | 45 | 48 => Some(WeatherCondition::Overcast),
            51..=67 | 80..=82 | 95..=99 => Some(WeatherCondition::Rain),
            71..=77 | 85 | 86 => Some(WeatherCondition::Snow),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::response::weather_code_to_condition;
    use crate::models::WeatherCondition;

    #[test]
    fn test_weather_code_mapping() {
        assert_eq!(weather_code_to_condition(0), Some(WeatherCondition::Clear));
        assert_eq!(weather_code_to_condition(2), Some(WeatherCondition::Clear));
        assert_eq!(
            weather_code_to_condition(3),
            Some(WeatherCondition::Overcast)
        );
        assert_eq!(weather_code_to_condition(61), Some(WeatherCondition::Rain));
        assert_eq!(weather_code_to_condition(95), Some(WeatherCondition::Rain));
        assert_eq!(weather_code_to_condition(71), Some(WeatherCondition::Snow));
        assert_eq!(weather_code_to_condition(86), Some(WeatherCondition::Snow));
    }

    #[test]
    fn test_unmapped_codes_are_none() {
        assert_eq!(weather_code_to_condition(42), None);
        assert_eq!(weather_code_to_condition(200), None);
    }
}
