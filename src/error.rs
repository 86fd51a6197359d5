use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors raised while building the catalog and index, or while querying them
#[derive(thiserror::Error, Debug)]
pub enum RecommenderError {
    #[error("Failed to load {source_name}: {reason}")]
    DataLoad { source_name: String, reason: String },

    #[error("Corpus produced an empty vocabulary")]
    EmptyCorpus,

    #[error("Title not found in catalog: {0}")]
    KeyNotFound(String),
}

impl RecommenderError {
    pub fn data_load(source_name: impl Into<String>, reason: impl ToString) -> Self {
        RecommenderError::DataLoad {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Recommender(#[from] RecommenderError),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Recommender(RecommenderError::KeyNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Recommender(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Cache(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ExternalApi(_) | AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            AppError::InvalidInput(msg) | AppError::ExternalApi(msg) => msg,
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
