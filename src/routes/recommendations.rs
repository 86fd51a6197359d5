use axum::{extract::State, Extension, Json};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{RecommendationRequest, RecommendationResponse},
    routes::AppState,
    services::posters::attach_posters,
};

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let top_n = state.effective_top_n(request.top_n);

    tracing::info!(
        request_id = %request_id,
        title = %request.title,
        top_n,
        "Processing recommendation request"
    );

    let mut recommendations = state
        .recommender
        .recommend_by_title(&request.title, top_n)
        .inspect_err(|e| {
            tracing::info!(request_id = %request_id, error = %e, "Recommendation lookup failed")
        })?;

    if request.include_posters {
        attach_posters(state.posters.clone(), &mut recommendations).await;
    }

    tracing::info!(
        request_id = %request_id,
        results = recommendations.len(),
        "Recommendations ready"
    );

    Ok(Json(RecommendationResponse {
        query: request.title,
        recommendations,
    }))
}
