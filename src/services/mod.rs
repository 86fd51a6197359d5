pub mod catalog;
pub mod posters;
pub mod ranker;
pub mod recommender;
pub mod text;
pub mod vectorizer;

pub use catalog::Catalog;
pub use posters::{OmdbPosterProvider, PosterProvider};
pub use recommender::RecommenderService;
pub use vectorizer::TfidfVectorizer;
