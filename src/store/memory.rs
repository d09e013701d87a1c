//! In-memory store implementation
//!
//! Backs tests and local runs. All records live in `BTreeMap`s behind a
//! single mutex, which also serializes appends.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::models::{NewLocation, NewReview, Review, SnackLocation};
use crate::rating;
use crate::store::{LocationStore, ReviewStore};
use crate::{Result, WeatherBitesError};

#[derive(Debug, Default)]
struct Inner {
    locations: BTreeMap<u64, SnackLocation>,
    reviews: BTreeMap<u64, Review>,
    next_location_id: u64,
    next_review_id: u64,
}

/// In-memory location and review store
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means a writer panicked; the data itself is
        // still consistent because every mutation completes before unlock.
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl LocationStore for MemoryStore {
    async fn find_by_city(&self, city: &str) -> Result<Vec<SnackLocation>> {
        let inner = self.lock();
        Ok(inner
            .locations
            .values()
            .filter(|l| l.city.eq_ignore_ascii_case(city))
            .cloned()
            .collect())
    }

    async fn get(&self, id: u64) -> Result<SnackLocation> {
        let inner = self.lock();
        inner
            .locations
            .get(&id)
            .cloned()
            .ok_or_else(|| WeatherBitesError::not_found(format!("location {id} not found")))
    }

    async fn save(&self, location: NewLocation) -> Result<u64> {
        location.validate()?;

        let mut inner = self.lock();
        inner.next_location_id += 1;
        let id = inner.next_location_id;
        inner
            .locations
            .insert(id, SnackLocation::new(id, location.name, location.city));
        Ok(id)
    }
}

impl ReviewStore for MemoryStore {
    async fn find_by_location(&self, location_id: u64) -> Result<Vec<Review>> {
        let inner = self.lock();
        Ok(inner
            .reviews
            .values()
            .filter(|r| r.location_id == location_id)
            .cloned()
            .collect())
    }

    async fn append(&self, review: NewReview) -> Result<u64> {
        review.validate()?;

        let mut inner = self.lock();
        if !inner.locations.contains_key(&review.location_id) {
            return Err(WeatherBitesError::validation(format!(
                "location {} does not exist",
                review.location_id
            )));
        }

        inner.next_review_id += 1;
        let id = inner.next_review_id;
        let location_id = review.location_id;
        inner.reviews.insert(
            id,
            Review {
                id,
                location_id,
                rating: review.rating,
                favorite: review.favorite,
                comment: review.comment,
            },
        );

        // Refresh the cached aggregate in the same critical section
        let reviews: Vec<Review> = inner
            .reviews
            .values()
            .filter(|r| r.location_id == location_id)
            .cloned()
            .collect();
        let summary = rating::summarize(&reviews);
        if let Some(location) = inner.locations.get_mut(&location_id) {
            location.rating = summary.rating;
            location.favorite = summary.favorite;
            location.review_count = summary.count;
        }

        Ok(id)
    }

    async fn find_favorites(&self) -> Result<Vec<Review>> {
        let inner = self.lock();
        Ok(inner
            .reviews
            .values()
            .filter(|r| r.favorite)
            .cloned()
            .collect())
    }
}
