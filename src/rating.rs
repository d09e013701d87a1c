//! Rating aggregation
//!
//! A location's aggregate standing is always derived from its review set.
//! Stored aggregates are a cache refreshed on append; this module is the
//! source of truth and recomputes from reviews on every call.

use serde::Serialize;

use crate::Result;
use crate::models::Review;
use crate::store::ReviewStore;

/// Current aggregate standing of a location
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    /// Mean review rating rounded to one decimal, 0.0 with no reviews
    pub rating: f32,
    /// True when at least one review is marked favorite
    pub favorite: bool,
    /// Number of reviews on record
    pub count: usize,
}

/// Compute the aggregate for a location from the review store
pub async fn aggregate<R: ReviewStore>(reviews: &R, location_id: u64) -> Result<RatingSummary> {
    let all = reviews.find_by_location(location_id).await?;
    Ok(summarize(&all))
}

/// Summarize a review set
///
/// Mean of the integer ratings rounded to one decimal (ties to even),
/// favorite is the OR over all flags, count is the set size. Linear in the
/// number of reviews; review counts per location stay small in this domain.
#[must_use]
pub fn summarize(reviews: &[Review]) -> RatingSummary {
    if reviews.is_empty() {
        return RatingSummary {
            rating: 0.0,
            favorite: false,
            count: 0,
        };
    }

    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let mean = f64::from(sum) / reviews.len() as f64;

    RatingSummary {
        rating: round_to_tenth(mean),
        favorite: reviews.iter().any(|r| r.favorite),
        count: reviews.len(),
    }
}

/// Round to one decimal place, ties to even
fn round_to_tenth(value: f64) -> f32 {
    ((value * 10.0).round_ties_even() / 10.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(id: u64, rating: u8, favorite: bool) -> Review {
        Review {
            id,
            location_id: 1,
            rating,
            favorite,
            comment: None,
        }
    }

    #[test]
    fn test_empty_review_set() {
        let summary = summarize(&[]);
        assert_eq!(summary.rating, 0.0);
        assert!(!summary.favorite);
        assert_eq!(summary.count, 0);
    }

    #[test]
    fn test_mean_rounded_to_one_decimal() {
        let summary = summarize(&[review(1, 4, false), review(2, 5, false)]);
        assert_eq!(summary.rating, 4.5);
        assert_eq!(summary.count, 2);

        let summary = summarize(&[review(1, 3, false)]);
        assert_eq!(summary.rating, 3.0);

        // 1 + 2 + 5 = 8, mean 2.666... -> 2.7
        let summary = summarize(&[review(1, 1, false), review(2, 2, false), review(3, 5, false)]);
        assert_eq!(summary.rating, 2.7);
    }

    #[test]
    fn test_ties_round_to_even() {
        // mean 4.25 -> 4.2
        let summary = summarize(&[
            review(1, 4, false),
            review(2, 4, false),
            review(3, 4, false),
            review(4, 5, false),
        ]);
        assert_eq!(summary.rating, 4.2);

        // mean 4.75 -> 4.8
        let summary = summarize(&[
            review(1, 5, false),
            review(2, 5, false),
            review(3, 5, false),
            review(4, 4, false),
        ]);
        assert_eq!(summary.rating, 4.8);
    }

    #[test]
    fn test_favorite_is_or_over_flags() {
        let none = summarize(&[review(1, 4, false), review(2, 5, false)]);
        assert!(!none.favorite);

        let one = summarize(&[review(1, 4, false), review(2, 5, true)]);
        assert!(one.favorite);
    }

    #[test]
    fn test_summarize_is_deterministic() {
        let reviews = vec![review(1, 2, true), review(2, 5, false)];
        assert_eq!(summarize(&reviews), summarize(&reviews));
    }
}
