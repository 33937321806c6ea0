use crate::domain::models::{ContentKind, ContentRef, Engagement, LikeToggle, Report};
use crate::error::{AppError, Result};
use crate::repository::{CommentRepository, FeedRepository, LikeRepository, ReportRepository};
use tracing::info;
use uuid::Uuid;

/// Toggle and report operations over engagement relations.
///
/// Both operations run entirely inside a repository-level transaction:
/// the relation row and the counter on the target commit or roll back
/// together. Toggling is deliberately not retry-safe: a retried call
/// flips the state again, so callers that need retry-safety read the
/// engagement state first.
#[derive(Clone)]
pub struct EngagementService {
    feeds: FeedRepository,
    comments: CommentRepository,
    likes: LikeRepository,
    reports: ReportRepository,
}

impl EngagementService {
    pub fn new(
        feeds: FeedRepository,
        comments: CommentRepository,
        likes: LikeRepository,
        reports: ReportRepository,
    ) -> Self {
        Self {
            feeds,
            comments,
            likes,
            reports,
        }
    }

    /// Toggle the caller's like on a feed or comment.
    pub async fn toggle_like(&self, user_id: Uuid, target: ContentRef) -> Result<LikeToggle> {
        let liked = match target.kind {
            ContentKind::Feed => self.likes.toggle_feed_like(user_id, target.id).await?,
            ContentKind::Comment => self.likes.toggle_comment_like(user_id, target.id).await?,
        };

        info!(
            "user {} toggled like on {} {}: liked={}",
            user_id, target.kind, target.id, liked
        );
        Ok(LikeToggle { liked })
    }

    /// File a moderation report. One report per (user, target); a
    /// duplicate surfaces as Conflict with no counter effect.
    pub async fn submit_report(
        &self,
        user_id: Uuid,
        target: ContentRef,
        reason: &str,
    ) -> Result<Report> {
        if reason.trim().is_empty() {
            return Err(AppError::Validation("report reason must not be empty".into()));
        }

        let report = match target.kind {
            ContentKind::Feed => self.reports.report_feed(user_id, target.id, reason).await?,
            ContentKind::Comment => {
                self.reports
                    .report_comment(user_id, target.id, reason)
                    .await?
            }
        };

        info!("user {} reported {} {}", user_id, target.kind, target.id);
        Ok(report)
    }

    /// Denormalized counters plus the viewer's own relation state for a
    /// feed. This is the read toggle callers use for retry-safety.
    pub async fn feed_engagement(
        &self,
        feed_id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<Engagement> {
        let feed = self
            .feeds
            .get(feed_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("feed {} not found", feed_id)))?;

        let (is_liked, is_reported) = match viewer {
            Some(user_id) => (
                self.likes.is_feed_liked(user_id, feed_id).await?,
                self.reports.is_feed_reported(user_id, feed_id).await?,
            ),
            None => (false, false),
        };

        Ok(Engagement {
            likes_count: feed.likes_count,
            comments_count: Some(feed.comments_count),
            reply_count: None,
            reported_count: feed.reported_count,
            is_liked,
            is_reported,
        })
    }

    /// Mirror of `feed_engagement` for comments.
    pub async fn comment_engagement(
        &self,
        comment_id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<Engagement> {
        let comment = self
            .comments
            .get(comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("comment {} not found", comment_id)))?;

        let (is_liked, is_reported) = match viewer {
            Some(user_id) => (
                self.likes.is_comment_liked(user_id, comment_id).await?,
                self.reports.is_comment_reported(user_id, comment_id).await?,
            ),
            None => (false, false),
        };

        Ok(Engagement {
            likes_count: comment.likes_count,
            comments_count: None,
            reply_count: Some(comment.reply_count),
            reported_count: comment.reported_count,
            is_liked,
            is_reported,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn service_with_lazy_pool() -> EngagementService {
        // connect_lazy never opens a connection; validation paths that
        // reject before I/O are testable without a database.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        EngagementService::new(
            FeedRepository::new(pool.clone()),
            CommentRepository::new(pool.clone()),
            LikeRepository::new(pool.clone()),
            ReportRepository::new(pool),
        )
    }

    #[tokio::test]
    async fn empty_reason_is_rejected_before_any_io() {
        let service = service_with_lazy_pool();
        let err = service
            .submit_report(Uuid::new_v4(), ContentRef::feed(Uuid::new_v4()), "   ")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
