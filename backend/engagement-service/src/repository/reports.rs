use crate::domain::models::Report;
use crate::error::{AppError, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for moderation reports on feeds and comments.
///
/// Reports are create-only: there is no retraction path, so
/// `reported_count` is monotonic non-decreasing. The (user, target)
/// unique constraint turns a duplicate report into `Conflict` before
/// any counter mutation takes effect.
#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// File a report against a feed and increment its reported_count,
    /// both in one transaction.
    pub async fn report_feed(&self, user_id: Uuid, feed_id: Uuid, reason: &str) -> Result<Report> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM feeds WHERE id = $1 AND is_displayed = TRUE")
                .bind(feed_id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Err(AppError::NotFound(format!("feed {} not found", feed_id)));
        }

        // Unique violation on (user_id, feed_id) maps to Conflict and
        // rolls back before the counter is touched.
        let report = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO feed_reports (user_id, feed_id, reason)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, feed_id AS target_id, reason, created_at
            "#,
        )
        .bind(user_id)
        .bind(feed_id)
        .bind(reason)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE feeds SET reported_count = reported_count + 1 WHERE id = $1")
            .bind(feed_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(report)
    }

    /// File a report against a comment. Same contract as `report_feed`.
    pub async fn report_comment(
        &self,
        user_id: Uuid,
        comment_id: Uuid,
        reason: &str,
    ) -> Result<Report> {
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

        let report = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO comment_reports (user_id, comment_id, reason)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, comment_id AS target_id, reason, created_at
            "#,
        )
        .bind(user_id)
        .bind(comment_id)
        .bind(reason)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE comments SET reported_count = reported_count + 1 WHERE id = $1")
            .bind(comment_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(report)
    }

    /// Check if a user has reported a feed
    pub async fn is_feed_reported(&self, user_id: Uuid, feed_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM feed_reports
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

    /// Check if a user has reported a comment
    pub async fn is_comment_reported(&self, user_id: Uuid, comment_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM comment_reports
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
