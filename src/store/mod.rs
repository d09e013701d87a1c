//! Location and review stores
//!
//! The engine treats storage as a transactional key/record store behind two
//! trait seams: an in-memory implementation backs tests and local runs, a
//! persistent implementation backs production, and engine logic is written
//! against the traits only.

use crate::Result;
use crate::models::{NewLocation, NewReview, Review, SnackLocation};

pub mod memory;
pub mod persistent;

pub use memory::MemoryStore;
pub use persistent::PersistentStore;

/// Authoritative store of snack-vendor records
pub trait LocationStore: Send + Sync {
    /// All locations registered for a city, unordered
    ///
    /// An unknown city yields an empty set, not an error.
    async fn find_by_city(&self, city: &str) -> Result<Vec<SnackLocation>>;

    /// Look up a single location, failing with `NotFound` for an unknown id
    async fn get(&self, id: u64) -> Result<SnackLocation>;

    /// Register a new location and return its assigned identifier
    async fn save(&self, location: NewLocation) -> Result<u64>;
}

/// Store of individual reviews keyed to a location
pub trait ReviewStore: Send + Sync {
    /// All reviews on record for a location, in insertion order
    async fn find_by_location(&self, location_id: u64) -> Result<Vec<Review>>;

    /// Append a review and return its assigned identifier
    ///
    /// Fails with `Validation` when the rating is outside the accepted
    /// range or the target location does not exist. Atomic with respect to
    /// a single review: either the review exists in full afterward or the
    /// store is unchanged. Concurrent appends are serialized.
    async fn append(&self, review: NewReview) -> Result<u64>;

    /// All reviews marked as favorites
    async fn find_favorites(&self) -> Result<Vec<Review>>;
}
