//! End-to-end engine scenarios over the in-memory store

use weather_bites::models::{NewLocation, NewReview, WeatherCondition, WeatherObservation};
use weather_bites::store::{LocationStore, MemoryStore, ReviewStore};
use weather_bites::weather::SnackCategory;
use weather_bites::{DEFAULT_LIMIT, rating, recommend};

async fn add_location(store: &MemoryStore, name: &str, city: &str) -> u64 {
    store
        .save(NewLocation {
            name: name.to_string(),
            city: city.to_string(),
        })
        .await
        .unwrap()
}

/// Boston on a clear 70°F day: reviewed locations rank by aggregate rating,
/// the unreviewed one trails at 0.0, and the pairing matches the category.
#[tokio::test]
async fn clear_day_ranks_boston_locations_by_rating() {
    let store = MemoryStore::new();
    let a = add_location(&store, "Boba Tea and Snow Ice House", "Boston").await;
    let b = add_location(&store, "Levain", "Boston").await;
    let c = add_location(&store, "Soup Shack", "Boston").await;

    store.append(NewReview::new(b, 4)).await.unwrap();
    store.append(NewReview::new(b, 5)).await.unwrap();
    store.append(NewReview::new(c, 3)).await.unwrap();

    let observation = WeatherObservation::new(
        "Boston".to_string(),
        Some(WeatherCondition::Clear),
        Some(70.0),
    );
    let result = recommend::recommend(&store, "Boston", &observation, DEFAULT_LIMIT)
        .await
        .unwrap();

    assert_eq!(result.category, SnackCategory::LightSnack);
    assert_eq!(result.pairing.suggestion, "fruit + water");

    let ranking: Vec<(u64, f32)> = result.ranked.iter().map(|l| (l.id, l.rating)).collect();
    assert_eq!(ranking, vec![(b, 4.5), (c, 3.0), (a, 0.0)]);
}

/// 95°F forces refreshing-cold no matter what the condition says.
#[tokio::test]
async fn heat_wins_over_any_condition() {
    let store = MemoryStore::new();
    add_location(&store, "JP Licks", "Boston").await;

    for condition in [
        None,
        Some(WeatherCondition::Clear),
        Some(WeatherCondition::Rain),
        Some(WeatherCondition::Snow),
        Some(WeatherCondition::Overcast),
        Some(WeatherCondition::ExtremeCold),
    ] {
        let observation = WeatherObservation::new("Boston".to_string(), condition, Some(95.0));
        let result = recommend::recommend(&store, "Boston", &observation, DEFAULT_LIMIT)
            .await
            .unwrap();
        assert_eq!(result.category, SnackCategory::RefreshingCold);
        assert_eq!(result.pairing.suggestion, "frozen treat + iced drink");
    }
}

/// A city with no locations is a valid, empty result, not an error.
#[tokio::test]
async fn unknown_city_yields_empty_ranking() {
    let store = MemoryStore::new();
    add_location(&store, "Tatte", "Boston").await;

    let observation = WeatherObservation::new(
        "Nowhere".to_string(),
        Some(WeatherCondition::Rain),
        Some(55.0),
    );
    let result = recommend::recommend(&store, "Nowhere", &observation, DEFAULT_LIMIT)
        .await
        .unwrap();

    assert_eq!(result.category, SnackCategory::HeartyWarm);
    assert!(result.ranked.is_empty());
    assert_eq!(result.pairing.suggestion, "savory snack + soup");
}

/// Out-of-range ratings are rejected before anything is written.
#[tokio::test]
async fn rejected_reviews_leave_the_store_unchanged() {
    let store = MemoryStore::new();
    let id = add_location(&store, "Fomu", "Boston").await;
    store.append(NewReview::new(id, 5)).await.unwrap();

    let before = store.find_by_location(id).await.unwrap();
    assert!(store.append(NewReview::new(id, 0)).await.is_err());
    assert!(store.append(NewReview::new(id, 6)).await.is_err());
    let after = store.find_by_location(id).await.unwrap();

    assert_eq!(before, after);
}

/// Aggregation is idempotent between appends and tracks each append.
#[tokio::test]
async fn aggregate_is_idempotent_and_tracks_appends() {
    let store = MemoryStore::new();
    let id = add_location(&store, "1369 Coffee House", "Cambridge").await;

    let empty = rating::aggregate(&store, id).await.unwrap();
    assert_eq!(empty.rating, 0.0);
    assert!(!empty.favorite);
    assert_eq!(empty.count, 0);

    store.append(NewReview::new(id, 4)).await.unwrap();
    store
        .append(NewReview::new(id, 5).favorite().with_comment("Best hot chocolate ever!"))
        .await
        .unwrap();

    let first = rating::aggregate(&store, id).await.unwrap();
    let second = rating::aggregate(&store, id).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.rating, 4.5);
    assert!(first.favorite);
    assert_eq!(first.count, 2);
}

/// Repeated requests over unchanged state return identical orderings.
#[tokio::test]
async fn recommendations_are_reproducible() {
    let store = MemoryStore::new();
    let a = add_location(&store, "Tiger Sugar", "Boston").await;
    let b = add_location(&store, "Kyo Matcha", "Boston").await;
    store.append(NewReview::new(a, 4)).await.unwrap();
    store.append(NewReview::new(b, 4)).await.unwrap();

    let observation = WeatherObservation::new(
        "Boston".to_string(),
        Some(WeatherCondition::Overcast),
        Some(60.0),
    );

    let first = recommend::recommend(&store, "Boston", &observation, DEFAULT_LIMIT)
        .await
        .unwrap();
    let second = recommend::recommend(&store, "Boston", &observation, DEFAULT_LIMIT)
        .await
        .unwrap();

    let first_ids: Vec<u64> = first.ranked.iter().map(|l| l.id).collect();
    let second_ids: Vec<u64> = second.ranked.iter().map(|l| l.id).collect();
    assert_eq!(first_ids, second_ids);
    // Equal scores fall back to ascending identifier
    assert_eq!(first_ids, vec![a, b]);
}
