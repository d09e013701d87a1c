//! Error types and handling for the Weather Bites service

use thiserror::Error;

/// Main error type for the Weather Bites service
#[derive(Error, Debug)]
pub enum WeatherBitesError {
    /// Malformed weather observation (client input)
    #[error("Invalid observation: {message}")]
    InvalidObservation { message: String },

    /// External weather provider failure
    #[error("Weather unavailable: {message}")]
    WeatherUnavailable { message: String },

    /// Review or location input validation errors (client input)
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Unknown location identifier (distinct from empty result sets)
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Record store operation errors
    #[error("Store error: {message}")]
    Store { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherBitesError {
    /// Create a new invalid-observation error
    pub fn invalid_observation<S: Into<String>>(message: S) -> Self {
        Self::InvalidObservation {
            message: message.into(),
        }
    }

    /// Create a new weather-unavailable error
    pub fn weather_unavailable<S: Into<String>>(message: S) -> Self {
        Self::WeatherUnavailable {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherBitesError::InvalidObservation { message } => {
                format!("Invalid weather observation: {message}")
            }
            WeatherBitesError::WeatherUnavailable { .. } => {
                "Weather data is currently unavailable. Please try again later.".to_string()
            }
            WeatherBitesError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WeatherBitesError::NotFound { message } => message.clone(),
            WeatherBitesError::Store { .. } => {
                "Storage operation failed. Please try again.".to_string()
            }
            WeatherBitesError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            WeatherBitesError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
