//! Data models for the Weather Bites service
//!
//! This module contains the core domain records organized by concern:
//! - Location: snack vendor records and their derived aggregates
//! - Review: individual user reviews keyed to a location
//! - Weather: current-weather observations from the external source

pub mod location;
pub mod review;
pub mod weather;

// Re-export all public types for convenient access
pub use location::{NewLocation, SnackLocation};
pub use review::{MAX_RATING, MIN_RATING, NewReview, Review};
pub use weather::{WeatherCondition, WeatherObservation};
