//! Snack location model and registration input

use serde::{Deserialize, Serialize};

use crate::{Result, WeatherBitesError};

/// A snack vendor registered in the location store
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SnackLocation {
    /// Store-assigned identifier, stable for the lifetime of the record
    pub id: u64,
    /// Vendor name
    pub name: String,
    /// City the vendor operates in
    pub city: String,
    /// Mean of review ratings rounded to one decimal, 0.0 with no reviews.
    /// Derived from the review set; never authored directly.
    pub rating: f32,
    /// True when at least one review marked this location as a favorite
    pub favorite: bool,
    /// Number of reviews on record
    pub review_count: usize,
}

impl SnackLocation {
    /// Create a freshly registered location with no reviews
    #[must_use]
    pub fn new(id: u64, name: String, city: String) -> Self {
        Self {
            id,
            name,
            city,
            rating: 0.0,
            favorite: false,
            review_count: 0,
        }
    }
}

/// Input for registering a new snack location
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NewLocation {
    pub name: String,
    pub city: String,
}

impl NewLocation {
    /// Check that both the vendor name and the city are present
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(WeatherBitesError::validation("location name is required"));
        }
        if self.city.trim().is_empty() {
            return Err(WeatherBitesError::validation("city is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_location_starts_unrated() {
        let location = SnackLocation::new(1, "Soup Shack".to_string(), "Boston".to_string());
        assert_eq!(location.rating, 0.0);
        assert!(!location.favorite);
        assert_eq!(location.review_count, 0);
    }

    #[test]
    fn test_new_location_requires_name_and_city() {
        let missing_name = NewLocation {
            name: "  ".to_string(),
            city: "Boston".to_string(),
        };
        assert!(missing_name.validate().is_err());

        let missing_city = NewLocation {
            name: "Tatte".to_string(),
            city: String::new(),
        };
        assert!(missing_city.validate().is_err());

        let valid = NewLocation {
            name: "Tatte".to_string(),
            city: "Boston".to_string(),
        };
        assert!(valid.validate().is_ok());
    }
}
