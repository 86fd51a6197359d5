use std::collections::HashMap;

use crate::error::RecommenderError;
use crate::models::Recommendation;
use crate::services::catalog::Catalog;
use crate::services::ranker;
use crate::services::vectorizer::{TfidfVectorizer, VectorIndex};

/// Catalog, TF-IDF index and title lookup, built once and shared read-only
#[derive(Debug)]
pub struct RecommenderService {
    catalog: Catalog,
    index: VectorIndex,
    /// Title to row, first occurrence wins
    title_lookup: HashMap<String, usize>,
    sorted_titles: Vec<String>,
}

impl RecommenderService {
    pub fn new(catalog: Catalog, vectorizer: &TfidfVectorizer) -> Result<Self, RecommenderError> {
        let index = vectorizer.build(&catalog.contents())?;

        let mut title_lookup = HashMap::with_capacity(catalog.len());
        let mut duplicates = 0usize;
        for (row, record) in catalog.records().iter().enumerate() {
            if title_lookup.contains_key(&record.title) {
                duplicates += 1;
            } else {
                title_lookup.insert(record.title.clone(), row);
            }
        }

        let mut sorted_titles: Vec<String> = title_lookup.keys().cloned().collect();
        sorted_titles.sort();

        tracing::info!(
            rows = index.num_rows(),
            vocabulary_size = index.vocabulary_size(),
            rows_without_terms = index.empty_rows(),
            duplicate_titles = duplicates,
            "Built recommendation index"
        );

        Ok(Self {
            catalog,
            index,
            title_lookup,
            sorted_titles,
        })
    }

    /// Distinct titles in ascending order
    pub fn titles(&self) -> &[String] {
        &self.sorted_titles
    }

    /// Row of the first catalog entry with exactly this title
    pub fn lookup_index(&self, title: &str) -> Result<usize, RecommenderError> {
        self.title_lookup
            .get(title)
            .copied()
            .ok_or_else(|| RecommenderError::KeyNotFound(title.to_string()))
    }

    /// Top `top_n` most similar entries to the row at `query_index`
    pub fn recommend(&self, query_index: usize, top_n: i64) -> Vec<Recommendation> {
        ranker::rank(&self.index, query_index, top_n)
            .into_iter()
            .filter_map(|(row, score)| {
                self.catalog.get(row).map(|record| Recommendation {
                    title: record.title.clone(),
                    genres: record.genres.clone(),
                    media_type: record.media_type,
                    similarity_score: score,
                    poster_url: None,
                })
            })
            .collect()
    }

    pub fn recommend_by_title(
        &self,
        title: &str,
        top_n: i64,
    ) -> Result<Vec<Recommendation>, RecommenderError> {
        let query_index = self.lookup_index(title)?;
        Ok(self.recommend(query_index, top_n))
    }

    /// Case-insensitive substring search over the sorted titles
    pub fn search_titles(&self, query: &str, limit: usize) -> Vec<&str> {
        let needle = query.to_lowercase();
        self.sorted_titles
            .iter()
            .filter(|t| t.to_lowercase().contains(&needle))
            .take(limit)
            .map(String::as_str)
            .collect()
    }
}
