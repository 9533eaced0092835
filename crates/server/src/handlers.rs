use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info};

use engine::RecommendOutcome;

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub movie_title: String,
    pub year: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct SearchSuggestionParams {
    pub query: String,
}

/// `POST /recommend`
///
/// Returns the recommendation bundle, the disambiguation object, or a
/// generic error. Internal failures are never detailed to the caller.
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Json<Value> {
    info!(
        "Received recommendation request for movie: {}, year: {:?}",
        request.movie_title, request.year
    );

    match state
        .recommender
        .recommend(&request.movie_title, request.year)
    {
        Ok(RecommendOutcome::Bundle(bundle)) => match serde_json::to_value(&bundle) {
            Ok(value) => Json(value),
            Err(e) => {
                error!("Failed to serialize bundle: {}", e);
                Json(json!({ "error": "An unexpected error occurred" }))
            }
        },
        Ok(RecommendOutcome::Unresolved(disambiguation)) => {
            info!("Query did not resolve: {}", disambiguation.message);
            match serde_json::to_value(&disambiguation) {
                Ok(value) => Json(value),
                Err(e) => {
                    error!("Failed to serialize disambiguation: {}", e);
                    Json(json!({ "error": "An unexpected error occurred" }))
                }
            }
        }
        Err(e) => {
            error!("Error recommending movies: {}", e);
            Json(json!({ "error": "An unexpected error occurred" }))
        }
    }
}

/// `GET /search-suggestions?query=...`
pub async fn search_suggestions(
    State(state): State<AppState>,
    Query(params): Query<SearchSuggestionParams>,
) -> Json<Value> {
    info!("Received search suggestions request for query: {}", params.query);
    let suggestions = state.recommender.search_suggestions(&params.query);
    Json(json!({ "suggestions": suggestions }))
}

/// `GET /health`
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
