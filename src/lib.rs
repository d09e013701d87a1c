//! `WeatherBites` - weather-driven snack recommendations
//!
//! This library provides the core functionality for classifying weather
//! observations into snack-affinity categories, ranking a city's snack
//! locations by their aggregate review ratings, and deriving pairing
//! suggestions.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pairing;
pub mod rating;
pub mod recommend;
pub mod store;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::WeatherBitesConfig;
pub use error::WeatherBitesError;
pub use models::{
    NewLocation, NewReview, Review, SnackLocation, WeatherCondition, WeatherObservation,
};
pub use pairing::{PairingSuggestion, pair};
pub use rating::{RatingSummary, aggregate};
pub use recommend::{DEFAULT_LIMIT, RecommendationResult, recommend};
pub use store::{LocationStore, MemoryStore, PersistentStore, ReviewStore};
pub use weather::{SnackCategory, WeatherClient, classify};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherBitesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
