use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    routes::AppState,
};

const SEARCH_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// All distinct catalog titles, sorted
pub async fn list(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.recommender.titles().to_vec())
}

/// Case-insensitive substring search over catalog titles
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<String>>> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let titles = state
        .recommender
        .search_titles(query, SEARCH_LIMIT)
        .into_iter()
        .map(str::to_string)
        .collect();
    Ok(Json(titles))
}
