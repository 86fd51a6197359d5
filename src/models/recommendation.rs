use serde::{Deserialize, Serialize};

use super::MediaType;

/// One ranked entry returned for a query title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub genres: String,
    pub media_type: MediaType,
    /// Cosine similarity to the query, in `[0, 1]`
    pub similarity_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

/// Body of `POST /api/v1/recommendations`
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    pub title: String,
    #[serde(default)]
    pub top_n: Option<i64>,
    #[serde(default)]
    pub include_posters: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub query: String,
    pub recommendations: Vec<Recommendation>,
}
