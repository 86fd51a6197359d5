//! Poster lookup for recommended titles.
//!
//! Posters are decoration: any failure falls back to a placeholder image
//! and never fails the recommendation that asked for it.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::Recommendation,
};

pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/300x450?text=No+Poster";

const POSTER_CACHE_TTL: u64 = 604800; // 1 week

/// Source of poster image URLs keyed by title
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// `Ok(None)` when the provider knows no poster for the title
    async fn poster_url(&self, title: &str) -> AppResult<Option<String>>;

    fn name(&self) -> &'static str;
}

/// OMDb lookup by exact title (`t=`)
#[derive(Clone)]
pub struct OmdbPosterProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Option<Cache>,
}

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

impl OmdbPosterProvider {
    pub fn new(
        api_key: String,
        api_url: String,
        timeout: Duration,
        cache: Option<Cache>,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key,
            api_url,
            cache,
        })
    }

    async fn fetch(&self, title: &str) -> AppResult<Option<String>> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OMDb returned status {}: {}",
                status, body
            )));
        }

        let body: OmdbResponse = response.json().await?;
        Ok(poster_from_response(body))
    }
}

fn poster_from_response(body: OmdbResponse) -> Option<String> {
    body.poster.filter(|p| !p.is_empty() && p != "N/A")
}

#[async_trait::async_trait]
impl PosterProvider for OmdbPosterProvider {
    async fn poster_url(&self, title: &str) -> AppResult<Option<String>> {
        match &self.cache {
            Some(cache) => cached!(
                cache,
                CacheKey::Poster(title.to_string()),
                POSTER_CACHE_TTL,
                self.fetch(title)
            ),
            None => self.fetch(title).await,
        }
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}

/// Poster URL for `title`, or the placeholder on a miss or any failure
pub async fn resolve_poster(provider: &dyn PosterProvider, title: &str) -> String {
    match provider.poster_url(title).await {
        Ok(Some(url)) => url,
        Ok(None) => PLACEHOLDER_POSTER_URL.to_string(),
        Err(e) => {
            tracing::warn!(
                provider = provider.name(),
                title = %title,
                error = %e,
                "Poster lookup failed, using placeholder"
            );
            PLACEHOLDER_POSTER_URL.to_string()
        }
    }
}

/// Fills `poster_url` on every recommendation, looking posters up concurrently.
/// Without a provider every entry gets the placeholder.
pub async fn attach_posters(
    provider: Option<Arc<dyn PosterProvider>>,
    recommendations: &mut [Recommendation],
) {
    let urls = match provider {
        Some(provider) => {
            join_all(
                recommendations
                    .iter()
                    .map(|r| resolve_poster(provider.as_ref(), &r.title)),
            )
            .await
        }
        None => vec![PLACEHOLDER_POSTER_URL.to_string(); recommendations.len()],
    };

    for (recommendation, url) in recommendations.iter_mut().zip(urls) {
        recommendation.poster_url = Some(url);
    }
}
