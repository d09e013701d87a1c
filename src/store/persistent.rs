//! Persistent store implementation
//!
//! Records are postcard-encoded into a fjall keyspace; blocking store I/O
//! runs on the blocking pool. A single write lock serializes mutations,
//! which both keeps the secondary indexes consistent and gives appends the
//! required serialization.
//!
//! Key layout:
//! - `location:{id}` → `SnackLocation`
//! - `review:{id}` → `Review`
//! - `city:{lowercased city}` → `Vec<u64>` of location ids
//! - `reviews-of:{location id}` → `Vec<u64>` of review ids
//! - `index:favorites` → `Vec<u64>` of favorite review ids
//! - `seq:location` / `seq:review` → last assigned id

use std::path::Path;

use fjall::Keyspace;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;
use tokio::task;

use crate::models::{NewLocation, NewReview, Review, SnackLocation};
use crate::rating;
use crate::store::{LocationStore, ReviewStore};
use crate::{Result, WeatherBitesError};

const LOCATION_SEQ: &str = "seq:location";
const REVIEW_SEQ: &str = "seq:review";
const FAVORITES_INDEX: &str = "index:favorites";

fn location_key(id: u64) -> String {
    format!("location:{id}")
}

fn review_key(id: u64) -> String {
    format!("review:{id}")
}

fn city_key(city: &str) -> String {
    format!("city:{}", city.to_lowercase())
}

fn reviews_of_key(location_id: u64) -> String {
    format!("reviews-of:{location_id}")
}

fn store_err<E: std::fmt::Display>(e: E) -> WeatherBitesError {
    WeatherBitesError::store(e.to_string())
}

fn get_from_store(store: Keyspace, key: Vec<u8>) -> Result<Option<Vec<u8>>> {
    Ok(store.get(key).map_err(store_err)?.map(|v| v.to_vec()))
}

/// fjall-backed location and review store
pub struct PersistentStore {
    store: Keyspace,
    write_lock: Mutex<()>,
}

impl PersistentStore {
    /// Open (or create) the record store at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path).open().map_err(store_err)?;
        let records = db
            .keyspace("records", fjall::KeyspaceCreateOptions::default)
            .map_err(store_err)?;
        Ok(PersistentStore {
            store: records,
            write_lock: Mutex::new(()),
        })
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes: Option<Vec<u8>> =
            task::spawn_blocking(move || get_from_store(store, key_bytes))
                .await
                .map_err(store_err)??;

        match maybe_bytes {
            Some(bytes) => Ok(Some(postcard::from_bytes(&bytes).map_err(store_err)?)),
            None => Ok(None),
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = postcard::to_stdvec(value).map_err(store_err)?;
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();

        task::spawn_blocking(move || store.insert(key, bytes))
            .await
            .map_err(store_err)?
            .map_err(store_err)?;
        Ok(())
    }

    /// Assign the next identifier from a sequence key
    ///
    /// Callers must hold the write lock.
    async fn next_id(&self, seq_key: &str) -> Result<u64> {
        let next = self.read::<u64>(seq_key).await?.unwrap_or(0) + 1;
        self.write(seq_key, &next).await?;
        Ok(next)
    }

    async fn load_reviews(&self, ids: &[u64]) -> Result<Vec<Review>> {
        let mut reviews = Vec::with_capacity(ids.len());
        for id in ids {
            match self.read::<Review>(&review_key(*id)).await? {
                Some(review) => reviews.push(review),
                None => tracing::warn!("review {id} is indexed but missing"),
            }
        }
        Ok(reviews)
    }
}

impl LocationStore for PersistentStore {
    #[tracing::instrument(name = "find_by_city", level = "debug", skip(self))]
    async fn find_by_city(&self, city: &str) -> Result<Vec<SnackLocation>> {
        let ids: Vec<u64> = self.read(&city_key(city)).await?.unwrap_or_default();

        let mut locations = Vec::with_capacity(ids.len());
        for id in ids {
            match self.read::<SnackLocation>(&location_key(id)).await? {
                Some(location) => locations.push(location),
                None => tracing::warn!("location {id} is indexed but missing"),
            }
        }
        Ok(locations)
    }

    async fn get(&self, id: u64) -> Result<SnackLocation> {
        self.read(&location_key(id))
            .await?
            .ok_or_else(|| WeatherBitesError::not_found(format!("location {id} not found")))
    }

    #[tracing::instrument(name = "save_location", level = "debug", skip(self, location))]
    async fn save(&self, location: NewLocation) -> Result<u64> {
        location.validate()?;

        let _guard = self.write_lock.lock().await;

        let id = self.next_id(LOCATION_SEQ).await?;
        let record = SnackLocation::new(id, location.name, location.city);

        self.write(&location_key(id), &record).await?;

        let key = city_key(&record.city);
        let mut ids: Vec<u64> = self.read(&key).await?.unwrap_or_default();
        ids.push(id);
        self.write(&key, &ids).await?;

        tracing::info!("Registered location {} ({})", record.name, id);
        Ok(id)
    }
}

impl ReviewStore for PersistentStore {
    #[tracing::instrument(name = "find_by_location", level = "debug", skip(self))]
    async fn find_by_location(&self, location_id: u64) -> Result<Vec<Review>> {
        let ids: Vec<u64> = self
            .read(&reviews_of_key(location_id))
            .await?
            .unwrap_or_default();
        self.load_reviews(&ids).await
    }

    #[tracing::instrument(name = "append_review", level = "debug", skip(self, review))]
    async fn append(&self, review: NewReview) -> Result<u64> {
        // Both checks run before anything is written
        review.validate()?;

        let _guard = self.write_lock.lock().await;

        let mut location: SnackLocation = self
            .read(&location_key(review.location_id))
            .await?
            .ok_or_else(|| {
                WeatherBitesError::validation(format!(
                    "location {} does not exist",
                    review.location_id
                ))
            })?;

        let id = self.next_id(REVIEW_SEQ).await?;
        let record = Review {
            id,
            location_id: review.location_id,
            rating: review.rating,
            favorite: review.favorite,
            comment: review.comment,
        };

        self.write(&review_key(id), &record).await?;

        let key = reviews_of_key(record.location_id);
        let mut ids: Vec<u64> = self.read(&key).await?.unwrap_or_default();
        ids.push(id);
        self.write(&key, &ids).await?;

        if record.favorite {
            let mut favorites: Vec<u64> = self.read(FAVORITES_INDEX).await?.unwrap_or_default();
            favorites.push(id);
            self.write(FAVORITES_INDEX, &favorites).await?;
        }

        // Refresh the cached aggregate while still holding the write lock
        let reviews = self.load_reviews(&ids).await?;
        let summary = rating::summarize(&reviews);
        location.rating = summary.rating;
        location.favorite = summary.favorite;
        location.review_count = summary.count;
        self.write(&location_key(location.id), &location).await?;

        tracing::info!(
            "Appended review {} for location {}",
            id,
            record.location_id
        );
        Ok(id)
    }

    #[tracing::instrument(name = "find_favorites", level = "debug", skip(self))]
    async fn find_favorites(&self) -> Result<Vec<Review>> {
        let ids: Vec<u64> = self.read(FAVORITES_INDEX).await?.unwrap_or_default();
        self.load_reviews(&ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp_store() -> (tempfile::TempDir, PersistentStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = PersistentStore::open(dir.path().join("records")).unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_save_and_find_by_city() {
        let (_dir, store) = open_temp_store();

        let id = store
            .save(NewLocation {
                name: "Pavement Coffeehouse".to_string(),
                city: "Boston".to_string(),
            })
            .await
            .unwrap();

        let found = store.find_by_city("boston").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);
        assert_eq!(found[0].name, "Pavement Coffeehouse");

        assert!(store.find_by_city("Nowhere").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_updates_aggregate_and_indexes() {
        let (_dir, store) = open_temp_store();

        let id = store
            .save(NewLocation {
                name: "JP Licks".to_string(),
                city: "Boston".to_string(),
            })
            .await
            .unwrap();

        store.append(NewReview::new(id, 4)).await.unwrap();
        store
            .append(NewReview::new(id, 5).favorite().with_comment("Great cones"))
            .await
            .unwrap();

        let location = store.get(id).await.unwrap();
        assert_eq!(location.rating, 4.5);
        assert!(location.favorite);
        assert_eq!(location.review_count, 2);

        let reviews = store.find_by_location(id).await.unwrap();
        assert_eq!(reviews.len(), 2);

        let favorites = store.find_favorites().await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].comment.as_deref(), Some("Great cones"));
    }

    #[tokio::test]
    async fn test_failed_append_leaves_store_unchanged() {
        let (_dir, store) = open_temp_store();

        let id = store
            .save(NewLocation {
                name: "Blank Street Coffee".to_string(),
                city: "Boston".to_string(),
            })
            .await
            .unwrap();

        assert!(store.append(NewReview::new(id, 6)).await.is_err());
        assert!(store.append(NewReview::new(id + 1, 3)).await.is_err());

        assert!(store.find_by_location(id).await.unwrap().is_empty());
        let location = store.get(id).await.unwrap();
        assert_eq!(location.rating, 0.0);
        assert_eq!(location.review_count, 0);
    }
}
