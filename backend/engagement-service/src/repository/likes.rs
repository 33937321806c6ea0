use crate::error::{AppError, Result};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

/// Repository for like relations on feeds and comments.
///
/// A like is row-existence, not a flag: toggling means deleting the row
/// if present, inserting it otherwise, with the paired counter mutation
/// in the same transaction. The counter update is a single atomic SQL
/// expression, never a read-modify-write in application code.
#[derive(Clone)]
pub struct LikeRepository {
    pool: PgPool,
}

impl LikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Toggle a like on a feed. Returns the post-condition of the
    /// existence check: true if the like now exists.
    ///
    /// Runs as one transaction: existence check, relation row mutation
    /// and counter adjustment commit or roll back together. A duplicate
    /// concurrent insert by the same user hits the unique constraint
    /// and surfaces as `Conflict`, never as a silent second row.
    pub async fn toggle_feed_like(&self, user_id: Uuid, feed_id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM feeds WHERE id = $1 AND is_displayed = TRUE")
                .bind(feed_id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Err(AppError::NotFound(format!("feed {} not found", feed_id)));
        }

        let deleted = sqlx::query(
            r#"
            DELETE FROM feed_likes
            WHERE user_id = $1 AND feed_id = $2
            "#,
        )
        .bind(user_id)
        .bind(feed_id)
        .execute(&mut *tx)
        .await?;

        let liked = if deleted.rows_affected() > 0 {
            let updated = sqlx::query(
                "UPDATE feeds SET likes_count = likes_count - 1 WHERE id = $1 AND likes_count > 0",
            )
            .bind(feed_id)
            .execute(&mut *tx)
            .await?;
            if updated.rows_affected() == 0 {
                warn!("likes_count underflow clamped at 0 for feed {}", feed_id);
            }
            false
        } else {
            sqlx::query(
                r#"
                INSERT INTO feed_likes (user_id, feed_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(user_id)
            .bind(feed_id)
            .execute(&mut *tx)
            .await?;

            sqlx::query("UPDATE feeds SET likes_count = likes_count + 1 WHERE id = $1")
                .bind(feed_id)
                .execute(&mut *tx)
                .await?;
            true
        };

        tx.commit().await?;
        Ok(liked)
    }

    /// Toggle a like on a comment. Same contract as `toggle_feed_like`.
    pub async fn toggle_comment_like(&self, user_id: Uuid, comment_id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM comments WHERE id = $1 AND is_displayed = TRUE")
                .bind(comment_id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Err(AppError::NotFound(format!(
                "comment {} not found",
                comment_id
            )));
        }

        let deleted = sqlx::query(
            r#"
            DELETE FROM comment_likes
            WHERE user_id = $1 AND comment_id = $2
            "#,
        )
        .bind(user_id)
        .bind(comment_id)
        .execute(&mut *tx)
        .await?;

        let liked = if deleted.rows_affected() > 0 {
            let updated = sqlx::query(
                "UPDATE comments SET likes_count = likes_count - 1 WHERE id = $1 AND likes_count > 0",
            )
            .bind(comment_id)
            .execute(&mut *tx)
            .await?;
            if updated.rows_affected() == 0 {
                warn!(
                    "likes_count underflow clamped at 0 for comment {}",
                    comment_id
                );
            }
            false
        } else {
            sqlx::query(
                r#"
                INSERT INTO comment_likes (user_id, comment_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(user_id)
            .bind(comment_id)
            .execute(&mut *tx)
            .await?;

            sqlx::query("UPDATE comments SET likes_count = likes_count + 1 WHERE id = $1")
                .bind(comment_id)
                .execute(&mut *tx)
                .await?;
            true
        };

        tx.commit().await?;
        Ok(liked)
    }

    /// Check if a user has liked a feed
    pub async fn is_feed_liked(&self, user_id: Uuid, feed_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM feed_likes
                WHERE user_id = $1 AND feed_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(feed_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Check if a user has liked a comment
    pub async fn is_comment_liked(&self, user_id: Uuid, comment_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM comment_likes
                WHERE user_id = $1 AND comment_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(comment_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
