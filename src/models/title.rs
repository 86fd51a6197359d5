use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Which source table a catalog entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
}

impl Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movie"),
            MediaType::TvShow => write!(f, "TV Show"),
        }
    }
}

/// A single movie or TV show in the catalog
///
/// Missing source cells are stored as empty strings, so every field is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub title: String,
    pub genres: String,
    pub description: String,
    pub media_type: MediaType,
}

impl CatalogRecord {
    pub fn new(
        title: impl Into<String>,
        genres: impl Into<String>,
        description: impl Into<String>,
        media_type: MediaType,
    ) -> Self {
        Self {
            title: title.into(),
            genres: genres.into(),
            description: description.into(),
            media_type,
        }
    }

    /// Composite text used for indexing: `title genres description`
    pub fn content(&self) -> String {
        format!("{} {} {}", self.title, self.genres, self.description)
    }
}
