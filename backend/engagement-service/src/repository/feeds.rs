use crate::domain::models::Feed;
use crate::error::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for feed rows.
///
/// Engagement counters on feeds are read-only here: every mutation goes
/// through the like/report/comment repositories inside their own
/// transactions.
#[derive(Clone)]
pub struct FeedRepository {
    pool: PgPool,
}

impl FeedRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a visible feed by ID
    pub async fn get(&self, feed_id: Uuid) -> Result<Option<Feed>> {
        let feed = sqlx::query_as::<_, Feed>(
            r#"
            SELECT id, user_id, category_id, content,
                   likes_count, comments_count, reported_count,
                   is_displayed, published_at, created_at, updated_at
            FROM feeds
            WHERE id = $1 AND is_displayed = TRUE
            "#,
        )
        .bind(feed_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(feed)
    }

    /// Count like rows for a feed (source of truth behind likes_count)
    pub async fn count_likes(&self, feed_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM feed_likes WHERE feed_id = $1")
            .bind(feed_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
