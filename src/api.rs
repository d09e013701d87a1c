//! HTTP API surface
//!
//! Thin passthrough over the core: handlers parse input, call the engine,
//! and map the error taxonomy onto status codes. No decision logic lives
//! here.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::WeatherBitesError;
use crate::models::{NewLocation, NewReview, Review, SnackLocation};
use crate::rating;
use crate::recommend;
use crate::store::{LocationStore, PersistentStore, ReviewStore};
use crate::weather::WeatherClient;

/// Shared state for all handlers
pub struct AppState {
    pub store: PersistentStore,
    pub weather: WeatherClient,
    pub max_results: usize,
}

#[derive(Serialize, Deserialize)]
pub struct ApiLocation {
    pub id: u64,
    pub name: String,
    pub city: String,
    pub rating: f32,
    pub favorite: bool,
}

impl From<&SnackLocation> for ApiLocation {
    fn from(location: &SnackLocation) -> Self {
        Self {
            id: location.id,
            name: location.name.clone(),
            city: location.city.clone(),
            rating: location.rating,
            favorite: location.favorite,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ApiReview {
    pub id: u64,
    pub location_id: u64,
    pub rating: u8,
    pub favorite: bool,
    pub comment: Option<String>,
}

impl From<&Review> for ApiReview {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id,
            location_id: review.location_id,
            rating: review.rating,
            favorite: review.favorite,
            comment: review.comment.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct RecommendationResponse {
    pub category: String,
    pub pairing: String,
    pub temperature_f: Option<f32>,
    pub recommendations: Vec<ApiLocation>,
}

#[derive(Deserialize)]
pub struct RecommendationQuery {
    pub city: String,
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct CityQuery {
    pub city: String,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: u64,
}

type ApiError = (StatusCode, Json<Value>);

fn error_response(err: WeatherBitesError) -> ApiError {
    let status = match &err {
        WeatherBitesError::InvalidObservation { .. } | WeatherBitesError::Validation { .. } => {
            StatusCode::BAD_REQUEST
        }
        WeatherBitesError::NotFound { .. } => StatusCode::NOT_FOUND,
        WeatherBitesError::WeatherUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.user_message() })))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/recommendation", get(get_recommendation))
        .route("/locations", post(create_location).get(get_locations))
        .route("/locations/{id}", get(get_location))
        .route("/locations/{id}/reviews", get(get_location_reviews))
        .route("/reviews", post(create_review))
        .route("/reviews/favorites", get(get_favorite_reviews))
        .route("/health", get(health))
        .with_state(state)
}

async fn get_recommendation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    if query.city.trim().is_empty() {
        return Err(error_response(WeatherBitesError::validation(
            "city is required",
        )));
    }

    let observation = state
        .weather
        .fetch_current_weather(&query.city)
        .await
        .map_err(error_response)?;

    let limit = query.limit.unwrap_or(state.max_results);
    let result = recommend::recommend(&state.store, &query.city, &observation, limit)
        .await
        .map_err(error_response)?;

    Ok(Json(RecommendationResponse {
        category: result.category.as_str().to_string(),
        pairing: result.pairing.suggestion,
        temperature_f: observation.temperature_f,
        recommendations: result.ranked.iter().map(ApiLocation::from).collect(),
    }))
}

async fn create_location(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewLocation>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let id = state.store.save(payload).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

async fn get_locations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CityQuery>,
) -> Result<Json<Vec<ApiLocation>>, ApiError> {
    let locations = state
        .store
        .find_by_city(&query.city)
        .await
        .map_err(error_response)?;

    let mut out = Vec::with_capacity(locations.len());
    for mut location in locations {
        let summary = rating::aggregate(&state.store, location.id)
            .await
            .map_err(error_response)?;
        location.rating = summary.rating;
        location.favorite = summary.favorite;
        location.review_count = summary.count;
        out.push(ApiLocation::from(&location));
    }
    Ok(Json(out))
}

async fn get_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ApiLocation>, ApiError> {
    let mut location = state.store.get(id).await.map_err(error_response)?;
    let summary = rating::aggregate(&state.store, id)
        .await
        .map_err(error_response)?;
    location.rating = summary.rating;
    location.favorite = summary.favorite;
    location.review_count = summary.count;
    Ok(Json(ApiLocation::from(&location)))
}

async fn get_location_reviews(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<ApiReview>>, ApiError> {
    // Distinguish an unknown location from one with no reviews yet
    state.store.get(id).await.map_err(error_response)?;

    let reviews = state
        .store
        .find_by_location(id)
        .await
        .map_err(error_response)?;
    Ok(Json(reviews.iter().map(ApiReview::from).collect()))
}

async fn create_review(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewReview>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let id = state.store.append(payload).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

async fn get_favorite_reviews(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ApiReview>>, ApiError> {
    let favorites = state.store.find_favorites().await.map_err(error_response)?;
    Ok(Json(favorites.iter().map(ApiReview::from).collect()))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let (status, _) = error_response(WeatherBitesError::validation("bad rating"));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = error_response(WeatherBitesError::invalid_observation("empty"));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = error_response(WeatherBitesError::not_found("location 9"));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = error_response(WeatherBitesError::weather_unavailable("down"));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, _) = error_response(WeatherBitesError::store("corrupt"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
