use crate::domain::models::Comment;
use crate::error::Result;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

/// Which denormalized counter a comment mutation touches.
///
/// The model supports exactly two levels: a top-level comment counts
/// against its feed's `comments_count`, a reply counts against its
/// parent's `reply_count`. Exactly one counter per mutation, selected
/// by the same rule on create and delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterTarget {
    FeedComments(Uuid),
    ParentReplies(Uuid),
}

impl CounterTarget {
    pub fn for_comment(feed_id: Uuid, parent_id: Option<Uuid>) -> Self {
        match parent_id {
            None => CounterTarget::FeedComments(feed_id),
            Some(parent) => CounterTarget::ParentReplies(parent),
        }
    }
}

/// Repository for comment rows and their cascading counter updates.
#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a visible comment by ID
    pub async fn get(&self, comment_id: Uuid) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, feed_id, parent_id, user_id, content,
                   likes_count, reply_count, reported_count,
                   is_displayed, created_at, updated_at
            FROM comments
            WHERE id = $1 AND is_displayed = TRUE
            "#,
        )
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Insert a comment and increment the counter it belongs to, in one
    /// transaction. The caller has already validated the feed, the
    /// parent and the two-level nesting rule.
    pub async fn create(
        &self,
        feed_id: Uuid,
        parent_id: Option<Uuid>,
        user_id: Uuid,
        content: &str,
    ) -> Result<Comment> {
        let mut tx = self.pool.begin().await?;

        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (feed_id, parent_id, user_id, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, feed_id, parent_id, user_id, content,
                      likes_count, reply_count, reported_count,
                      is_displayed, created_at, updated_at
            "#,
        )
        .bind(feed_id)
        .bind(parent_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(&mut *tx)
        .await?;

        match CounterTarget::for_comment(feed_id, parent_id) {
            CounterTarget::FeedComments(feed) => {
                sqlx::query("UPDATE feeds SET comments_count = comments_count + 1 WHERE id = $1")
                    .bind(feed)
                    .execute(&mut *tx)
                    .await?;
            }
            CounterTarget::ParentReplies(parent) => {
                sqlx::query("UPDATE comments SET reply_count = reply_count + 1 WHERE id = $1")
                    .bind(parent)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(comment)
    }

    /// Delete a comment and decrement the counter selected by the same
    /// top-level/reply rule, in one transaction.
    ///
    /// Replies of a deleted top-level comment are removed by the
    /// storage-level ON DELETE CASCADE; the cascade adjusts no counter
    /// beyond the immediate one handled here.
    pub async fn delete(&self, comment: &Comment) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment.id)
            .execute(&mut *tx)
            .await?;

        // A concurrent request may have removed the row already; the
        // counter only moves together with the row.
        if deleted.rows_affected() == 0 {
            tx.commit().await?;
            return Ok(());
        }

        let updated = match CounterTarget::for_comment(comment.feed_id, comment.parent_id) {
            CounterTarget::FeedComments(feed) => {
                sqlx::query(
                    "UPDATE feeds SET comments_count = comments_count - 1 WHERE id = $1 AND comments_count > 0",
                )
                .bind(feed)
                .execute(&mut *tx)
                .await?
            }
            CounterTarget::ParentReplies(parent) => {
                sqlx::query(
                    "UPDATE comments SET reply_count = reply_count - 1 WHERE id = $1 AND reply_count > 0",
                )
                .bind(parent)
                .execute(&mut *tx)
                .await?
            }
        };
        if updated.rows_affected() == 0 {
            warn!(
                "comment counter underflow clamped at 0 while deleting comment {}",
                comment.id
            );
        }

        tx.commit().await?;
        Ok(())
    }

    /// Count direct replies of a comment
    pub async fn count_replies(&self, parent_id: Uuid) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE parent_id = $1")
                .bind(parent_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
