mod recommendation;
mod title;

pub use recommendation::{Recommendation, RecommendationRequest, RecommendationResponse};
pub use title::{CatalogRecord, MediaType};
