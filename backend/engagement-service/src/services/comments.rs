use crate::domain::models::Comment;
use crate::error::{AppError, Result};
use crate::repository::{CommentRepository, FeedRepository};
use crate::services::ReferenceDataService;
use tracing::info;
use uuid::Uuid;

/// Comment lifecycle entry points, owning the cascading counter rules.
///
/// Creating a top-level comment increments the feed's comments_count;
/// creating a reply increments the parent's reply_count. Exactly one
/// counter per mutation, and the delete path mirrors the same rule as
/// a clamped decrement. The tree is two levels deep: replying to a
/// reply is rejected.
#[derive(Clone)]
pub struct CommentService {
    comments: CommentRepository,
    feeds: FeedRepository,
    reference: ReferenceDataService,
}

impl CommentService {
    pub fn new(
        comments: CommentRepository,
        feeds: FeedRepository,
        reference: ReferenceDataService,
    ) -> Self {
        Self {
            comments,
            feeds,
            reference,
        }
    }

    /// Create a comment (or a reply when parent_id is set) and update
    /// the owning counter in the same transaction.
    pub async fn create(
        &self,
        user_id: Uuid,
        feed_id: Uuid,
        parent_id: Option<Uuid>,
        content: &str,
    ) -> Result<Comment> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("comment content must not be empty".into()));
        }
        if self.reference.is_banned_substring(content).await? {
            return Err(AppError::Validation(
                "comment content contains a prohibited word".into(),
            ));
        }

        self.feeds
            .get(feed_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("feed {} not found", feed_id)))?;

        if let Some(parent_id) = parent_id {
            let parent = self
                .comments
                .get(parent_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("parent comment {} not found", parent_id))
                })?;
            validate_parent(&parent, feed_id)?;
        }

        let comment = self
            .comments
            .create(feed_id, parent_id, user_id, content)
            .await?;

        info!(
            "user {} commented on feed {} (reply={})",
            user_id,
            feed_id,
            comment.parent_id.is_some()
        );
        Ok(comment)
    }

    /// Delete the caller's own comment. Replies are removed by the
    /// storage-level cascade without further counter adjustments.
    pub async fn delete(&self, user_id: Uuid, comment_id: Uuid) -> Result<()> {
        let comment = self
            .comments
            .get(comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("comment {} not found", comment_id)))?;

        if comment.user_id != user_id {
            return Err(AppError::PermissionDenied(
                "only the author may delete a comment".into(),
            ));
        }

        self.comments.delete(&comment).await?;
        info!("user {} deleted comment {}", user_id, comment_id);
        Ok(())
    }
}

/// A reply may only attach to a top-level comment of the same feed.
fn validate_parent(parent: &Comment, feed_id: Uuid) -> Result<()> {
    if parent.feed_id != feed_id {
        return Err(AppError::Validation(
            "parent comment belongs to a different feed".into(),
        ));
    }
    if parent.parent_id.is_some() {
        return Err(AppError::Validation(
            "replies to replies are not supported".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn comment(feed_id: Uuid, parent_id: Option<Uuid>) -> Comment {
        Comment {
            id: Uuid::new_v4(),
            feed_id,
            parent_id,
            user_id: Uuid::new_v4(),
            content: "hello".into(),
            likes_count: 0,
            reply_count: 0,
            reported_count: 0,
            is_displayed: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn top_level_parent_of_same_feed_is_accepted() {
        let feed_id = Uuid::new_v4();
        let parent = comment(feed_id, None);
        assert!(validate_parent(&parent, feed_id).is_ok());
    }

    #[test]
    fn reply_to_a_reply_is_rejected() {
        let feed_id = Uuid::new_v4();
        let parent = comment(feed_id, Some(Uuid::new_v4()));
        let err = validate_parent(&parent, feed_id).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn parent_from_another_feed_is_rejected() {
        let parent = comment(Uuid::new_v4(), None);
        let err = validate_parent(&parent, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
