use crate::domain::models::FeedCategory;
use crate::error::Result;
use crate::repository::{CategoryRepository, ProhibitedWordRepository};
use redis::{aio::ConnectionManager, AsyncCommands};
use tracing::{debug, warn};

/// Read-through cache for small, read-mostly reference sets.
///
/// Two keys, both scoped by the application environment and expiring
/// after a fixed TTL:
///
/// - `feed_category:list:{env}` — invalidated (deleted, not updated)
///   immediately on every write to the category set.
/// - `prohibited_words:list:{env}` — intentionally has NO write
///   invalidation hook; staleness is bounded only by TTL expiry.
///
/// A Redis failure on the read path degrades to a direct Postgres load
/// and is logged, never surfaced to the caller.
#[derive(Clone)]
pub struct ReferenceDataService {
    redis: ConnectionManager,
    categories: CategoryRepository,
    words: ProhibitedWordRepository,
    env: String,
    ttl_secs: u64,
}

/// True when the candidate contains any of the prohibited words as a
/// substring.
pub fn contains_prohibited(words: &[String], candidate: &str) -> bool {
    words
        .iter()
        .any(|w| !w.is_empty() && candidate.contains(w.as_str()))
}

fn category_list_key(env: &str) -> String {
    format!("feed_category:list:{}", env)
}

fn prohibited_words_key(env: &str) -> String {
    format!("prohibited_words:list:{}", env)
}

impl ReferenceDataService {
    pub fn new(
        redis: ConnectionManager,
        categories: CategoryRepository,
        words: ProhibitedWordRepository,
        env: String,
        ttl_secs: u64,
    ) -> Self {
        Self {
            redis,
            categories,
            words,
            env,
            ttl_secs,
        }
    }

    /// Displayed categories, served from cache within the TTL window.
    pub async fn categories(&self) -> Result<Vec<FeedCategory>> {
        let key = category_list_key(&self.env);
        let mut conn = self.redis.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(data)) => match serde_json::from_str::<Vec<FeedCategory>>(&data) {
                Ok(categories) => {
                    debug!("category cache HIT");
                    return Ok(categories);
                }
                Err(e) => {
                    warn!("failed to deserialize cached categories, reloading: {}", e);
                }
            },
            Ok(None) => debug!("category cache MISS"),
            Err(e) => warn!("redis read error for category cache: {}", e),
        }

        let categories = self.categories.list_displayed().await?;
        self.warm(&key, &categories).await;
        Ok(categories)
    }

    /// Create a category and invalidate the cached list.
    pub async fn create_category(
        &self,
        key: &str,
        name: &str,
        emoji: &str,
        color: &str,
        scope: Option<&str>,
    ) -> Result<FeedCategory> {
        let category = self.categories.create(key, name, emoji, color, scope).await?;
        self.invalidate_categories().await;
        Ok(category)
    }

    /// Update a category and invalidate the cached list.
    pub async fn update_category(
        &self,
        id: i64,
        name: &str,
        emoji: &str,
        color: &str,
        is_displayed: bool,
    ) -> Result<Option<FeedCategory>> {
        let category = self
            .categories
            .update(id, name, emoji, color, is_displayed)
            .await?;
        if category.is_some() {
            self.invalidate_categories().await;
        }
        Ok(category)
    }

    /// Delete a category and invalidate the cached list.
    pub async fn delete_category(&self, id: i64) -> Result<bool> {
        let deleted = self.categories.delete(id).await?;
        if deleted {
            self.invalidate_categories().await;
        }
        Ok(deleted)
    }

    /// Delete the cached category list so the next read recomputes it.
    /// The Postgres write has already committed, so an invalidation
    /// failure only logs; staleness stays bounded by the TTL.
    pub async fn invalidate_categories(&self) {
        let key = category_list_key(&self.env);
        let mut conn = self.redis.clone();
        match conn.del::<_, ()>(&key).await {
            Ok(()) => debug!("category cache invalidated"),
            Err(e) => warn!("failed to invalidate category cache: {}", e),
        }
    }

    /// True when the candidate contains a prohibited word. The word
    /// list is cached with the same TTL as the category list but no
    /// write hook invalidates it: a newly added word may take up to
    /// the TTL to become effective.
    pub async fn is_banned_substring(&self, candidate: &str) -> Result<bool> {
        let key = prohibited_words_key(&self.env);
        let mut conn = self.redis.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(data)) => match serde_json::from_str::<Vec<String>>(&data) {
                Ok(words) => return Ok(contains_prohibited(&words, candidate)),
                Err(e) => {
                    warn!("failed to deserialize cached word list, reloading: {}", e);
                }
            },
            Ok(None) => debug!("prohibited-word cache MISS"),
            Err(e) => warn!("redis read error for prohibited-word cache: {}", e),
        }

        let words = self.words.list_words().await?;
        self.warm(&key, &words).await;
        Ok(contains_prohibited(&words, candidate))
    }

    /// Best-effort cache warm; a Redis write failure only logs.
    async fn warm<T: serde::Serialize>(&self, key: &str, value: &T) {
        let data = match serde_json::to_string(value) {
            Ok(data) => data,
            Err(e) => {
                warn!("failed to serialize reference data for cache: {}", e);
                return;
            }
        };

        let mut conn = self.redis.clone();
        if let Err(e) = conn.set_ex::<_, _, ()>(key, data, self.ttl_secs).await {
            warn!("failed to warm reference cache {}: {}", key, e);
        }
    }
}
