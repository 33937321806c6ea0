use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two content kinds that carry engagement counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Feed,
    Comment,
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Feed => write!(f, "feed"),
            ContentKind::Comment => write!(f, "comment"),
        }
    }
}

/// Reference to a likeable/reportable content row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRef {
    pub kind: ContentKind,
    pub id: Uuid,
}

impl ContentRef {
    pub fn feed(id: Uuid) -> Self {
        Self {
            kind: ContentKind::Feed,
            id,
        }
    }

    pub fn comment(id: Uuid) -> Self {
        Self {
            kind: ContentKind::Comment,
            id,
        }
    }
}

/// Feed entity with denormalized engagement counters
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Feed {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: i64,
    pub content: String,
    pub likes_count: i32,
    pub comments_count: i32,
    pub reported_count: i32,
    pub is_displayed: bool,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment entity - parent_id NULL means top-level, otherwise a reply
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub feed_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub user_id: Uuid,
    pub content: String,
    pub likes_count: i32,
    pub reply_count: i32,
    pub reported_count: i32,
    pub is_displayed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Moderation report row - one per (user, target), never retracted
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Report {
    pub id: i64,
    pub user_id: Uuid,
    pub target_id: Uuid,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// Result of a like toggle: the post-condition of the existence check
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LikeToggle {
    pub liked: bool,
}

/// Denormalized counters plus the viewer's own relation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engagement {
    pub likes_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_count: Option<i32>,
    pub reported_count: i32,
    pub is_liked: bool,
    pub is_reported: bool,
}

/// Feed category reference data, cached with a fixed TTL
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FeedCategory {
    pub id: i64,
    pub key: String,
    pub name: String,
    pub emoji: String,
    pub color: String,
    pub scope: Option<String>,
    pub is_displayed: bool,
}
