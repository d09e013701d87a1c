//! Review model and submission input

use serde::{Deserialize, Serialize};

use crate::{Result, WeatherBitesError};

/// Lowest accepted star rating
pub const MIN_RATING: u8 = 1;
/// Highest accepted star rating
pub const MAX_RATING: u8 = 5;

/// A single user review of a snack location
///
/// Reviews are immutable once created; corrections are modeled as new
/// reviews.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Review {
    /// Store-assigned identifier, monotonically increasing
    pub id: u64,
    /// Identifier of the reviewed location
    pub location_id: u64,
    /// Star rating from 1 to 5
    pub rating: u8,
    /// Whether the reviewer marked the location as a favorite
    pub favorite: bool,
    /// Optional free-text comment
    pub comment: Option<String>,
}

/// Input for submitting a new review
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NewReview {
    pub location_id: u64,
    pub rating: u8,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub comment: Option<String>,
}

impl NewReview {
    /// Create a review submission with the favorite flag unset and no comment
    #[must_use]
    pub fn new(location_id: u64, rating: u8) -> Self {
        Self {
            location_id,
            rating,
            favorite: false,
            comment: None,
        }
    }

    /// Mark the submission as a favorite
    #[must_use]
    pub fn favorite(mut self) -> Self {
        self.favorite = true;
        self
    }

    /// Attach a free-text comment
    #[must_use]
    pub fn with_comment<S: Into<String>>(mut self, comment: S) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Check the rating range before anything is persisted
    pub fn validate(&self) -> Result<()> {
        if self.rating < MIN_RATING || self.rating > MAX_RATING {
            return Err(WeatherBitesError::validation(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}, got {}",
                self.rating
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_range() {
        assert!(NewReview::new(1, 0).validate().is_err());
        assert!(NewReview::new(1, 6).validate().is_err());
        for rating in MIN_RATING..=MAX_RATING {
            assert!(NewReview::new(1, rating).validate().is_ok());
        }
    }

    #[test]
    fn test_builder_helpers() {
        let review = NewReview::new(3, 5).favorite().with_comment("Best boba ever!");
        assert_eq!(review.location_id, 3);
        assert_eq!(review.rating, 5);
        assert!(review.favorite);
        assert_eq!(review.comment.as_deref(), Some("Best boba ever!"));
    }
}
