//! Recommendation engine
//!
//! Combines the weather classifier with the location store and rating
//! aggregator to rank a city's snack locations for the current conditions.

use serde::Serialize;

use crate::Result;
use crate::models::{SnackLocation, WeatherObservation};
use crate::pairing::{self, PairingSuggestion};
use crate::rating;
use crate::store::{LocationStore, ReviewStore};
use crate::weather::{self, SnackCategory};

/// Default number of ranked locations returned
pub const DEFAULT_LIMIT: usize = 5;

/// Ranked outcome of a single recommendation request; never persisted
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResult {
    pub category: SnackCategory,
    pub ranked: Vec<SnackLocation>,
    pub pairing: PairingSuggestion,
}

/// Rank a city's snack locations against the current weather
///
/// Read-only over the stores. Each candidate is scored with its aggregate
/// rating recomputed from the review set, sorted descending with ties
/// broken by ascending identifier, and the ranking truncated to `limit`.
/// A city with no locations yields an empty ranking, not an error.
/// Unreviewed locations score 0.0 and rank last, so new vendors stay
/// discoverable.
pub async fn recommend<S>(
    store: &S,
    city: &str,
    observation: &WeatherObservation,
    limit: usize,
) -> Result<RecommendationResult>
where
    S: LocationStore + ReviewStore,
{
    let category = weather::classify(observation)?;

    let candidates = store.find_by_city(city).await?;
    tracing::debug!(
        category = category.as_str(),
        candidates = candidates.len(),
        "Ranking snack locations for {city}"
    );

    let mut ranked = Vec::with_capacity(candidates.len());
    for mut candidate in candidates {
        let summary = rating::aggregate(store, candidate.id).await?;
        candidate.rating = summary.rating;
        candidate.favorite = summary.favorite;
        candidate.review_count = summary.count;
        ranked.push(candidate);
    }

    ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating).then_with(|| a.id.cmp(&b.id)));
    ranked.truncate(limit);

    let pairing = pairing::pair(category, ranked.first());

    Ok(RecommendationResult {
        category,
        ranked,
        pairing,
    })
}
