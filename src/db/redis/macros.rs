/// Returns the cached value for `$key`, or awaits `$block`, stores its result
/// with a TTL of `$ttl` seconds in the background and returns it.
///
/// A failed cache read is logged and treated as a miss, so an unavailable
/// Redis only costs the cache, not the value. Errors from `$block` propagate
/// with `?`, so the enclosing function must return an `AppResult`.
///
/// ```rust,ignore
/// let url = cached!(cache, CacheKey::Poster(title.to_string()), POSTER_CACHE_TTL, async {
///     fetch_poster(title).await
/// })?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        let hit = match $cache.get_from_cache(&key).await {
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache read failed, computing value");
                None
            }
        };
        if let Some(cached) = hit {
            tracing::debug!(key = %key, "Cache hit");
            Ok(cached)
        } else {
            tracing::debug!(key = %key, "Cache miss");
            let value = $block.await?;
            $cache.set_in_background(&key, &value, $ttl);
            Ok(value)
        }
    }};
}
