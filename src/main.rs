use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use title_recommender::{
    config::Config,
    db::{create_redis_client, Cache},
    models::MediaType,
    routes::{create_router, AppState},
    services::{catalog, OmdbPosterProvider, RecommenderService, TfidfVectorizer},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("title_recommender=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let catalog = catalog::load_from_paths(&config.movies_path, &config.shows_path)
        .with_context(|| {
            format!(
                "Failed to load catalog from {} and {}",
                config.movies_path, config.shows_path
            )
        })?;
    tracing::info!(
        movies = catalog.count(MediaType::Movie),
        shows = catalog.count(MediaType::TvShow),
        "Loaded catalog"
    );

    let vectorizer = TfidfVectorizer::new().with_max_features(config.max_features);
    let recommender = Arc::new(
        RecommenderService::new(catalog, &vectorizer).context("Failed to build recommendation index")?,
    );

    let mut cache_handle = None;
    let cache = match &config.redis_url {
        Some(url) => {
            let (cache, handle) = Cache::new(create_redis_client(url)?);
            cache_handle = Some(handle);
            Some(cache)
        }
        None => None,
    };

    let mut state = AppState::new(recommender)
        .with_top_n_limits(config.default_top_n, config.max_top_n);

    match &config.omdb_api_key {
        Some(api_key) => {
            let provider = OmdbPosterProvider::new(
                api_key.clone(),
                config.omdb_api_url.clone(),
                Duration::from_secs(config.poster_timeout_secs),
                cache,
            )?;
            state = state.with_posters(Arc::new(provider));
        }
        None => tracing::warn!("OMDB_API_KEY not set, posters will use the placeholder"),
    }

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;
    tracing::info!(addr = %config.bind_addr(), "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_handle {
        handle.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
