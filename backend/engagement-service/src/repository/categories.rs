use crate::domain::models::FeedCategory;
use crate::error::Result;
use sqlx::PgPool;

/// Repository for the feed category reference set.
#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List displayed categories, stable order
    pub async fn list_displayed(&self) -> Result<Vec<FeedCategory>> {
        let categories = sqlx::query_as::<_, FeedCategory>(
            r#"
            SELECT id, key, name, emoji, color, scope, is_displayed
            FROM feed_categories
            WHERE is_displayed = TRUE
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Create a category. Duplicate key maps to Conflict.
    pub async fn create(
        &self,
        key: &str,
        name: &str,
        emoji: &str,
        color: &str,
        scope: Option<&str>,
    ) -> Result<FeedCategory> {
        let category = sqlx::query_as::<_, FeedCategory>(
            r#"
            INSERT INTO feed_categories (key, name, emoji, color, scope)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, key, name, emoji, color, scope, is_displayed
            "#,
        )
        .bind(key)
        .bind(name)
        .bind(emoji)
        .bind(color)
        .bind(scope)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    /// Update mutable fields of a category
    pub async fn update(
        &self,
        id: i64,
        name: &str,
        emoji: &str,
        color: &str,
        is_displayed: bool,
    ) -> Result<Option<FeedCategory>> {
        let category = sqlx::query_as::<_, FeedCategory>(
            r#"
            UPDATE feed_categories
            SET name = $2, emoji = $3, color = $4, is_displayed = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, key, name, emoji, color, scope, is_displayed
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(emoji)
        .bind(color)
        .bind(is_displayed)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Delete a category. Returns false when it did not exist.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM feed_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
