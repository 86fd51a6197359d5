use std::sync::Arc;

use crate::services::{PosterProvider, RecommenderService};

/// Shared handler state; everything inside is read-only after startup
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<RecommenderService>,
    pub posters: Option<Arc<dyn PosterProvider>>,
    pub default_top_n: i64,
    pub max_top_n: i64,
}

impl AppState {
    pub fn new(recommender: Arc<RecommenderService>) -> Self {
        Self {
            recommender,
            posters: None,
            default_top_n: 6,
            max_top_n: 50,
        }
    }

    pub fn with_posters(mut self, posters: Arc<dyn PosterProvider>) -> Self {
        self.posters = Some(posters);
        self
    }

    pub fn with_top_n_limits(mut self, default_top_n: i64, max_top_n: i64) -> Self {
        self.default_top_n = default_top_n;
        self.max_top_n = max_top_n;
        self
    }

    /// Requested count, defaulted and capped; non-positive values pass through
    pub fn effective_top_n(&self, requested: Option<i64>) -> i64 {
        requested.unwrap_or(self.default_top_n).min(self.max_top_n)
    }
}
