//! End-to-end engagement flows against a real Postgres.
//!
//! These tests need DATABASE_URL pointing at a scratch database; they
//! skip silently when it is not set so the suite stays green on
//! machines without infrastructure.
//!
//! Run: DATABASE_URL=postgres://localhost/engagement_test cargo test --test engagement_flow

use engagement_service::domain::models::ContentRef;
use engagement_service::error::AppError;
use engagement_service::repository::{
    CommentRepository, FeedRepository, LikeRepository, ReportRepository,
};
use engagement_service::services::EngagementService;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&url)
        .await
        .expect("failed to connect to test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");
    Some(pool)
}

/// Insert a category and feed to hang engagement rows off.
async fn seed_feed(pool: &PgPool) -> Uuid {
    let category_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO feed_categories (key, name, emoji, color)
        VALUES ($1, 'Test', '🧪', '#000000')
        RETURNING id
        "#,
    )
    .bind(format!("test-{}", Uuid::new_v4()))
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query_scalar(
        r#"
        INSERT INTO feeds (user_id, category_id, content)
        VALUES ($1, $2, 'test feed')
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(category_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn feed_counts(pool: &PgPool, feed_id: Uuid) -> (i32, i32, i32) {
    sqlx::query_as(
        "SELECT likes_count, comments_count, reported_count FROM feeds WHERE id = $1",
    )
    .bind(feed_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[tokio::test]
async fn toggle_alternates_and_counter_tracks_rows() {
    let Some(pool) = test_pool().await else { return };
    let feed_id = seed_feed(&pool).await;
    let feeds = FeedRepository::new(pool.clone());
    let likes = LikeRepository::new(pool.clone());
    let user = Uuid::new_v4();

    // k toggles: liked is true exactly when k is odd
    for k in 1..=5 {
        let liked = likes.toggle_feed_like(user, feed_id).await.unwrap();
        assert_eq!(liked, k % 2 == 1, "toggle {} returned wrong parity", k);

        let row_count = feeds.count_likes(feed_id).await.unwrap();
        assert_eq!(row_count == 1, liked);

        let (likes_count, _, _) = feed_counts(&pool, feed_id).await;
        assert_eq!(likes_count as i64, row_count, "counter diverged from rows");
    }
}

#[tokio::test]
async fn concurrent_toggles_by_distinct_actors_lose_no_increment() {
    let Some(pool) = test_pool().await else { return };
    let feed_id = seed_feed(&pool).await;
    let likes = LikeRepository::new(pool.clone());

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let likes = likes.clone();
            tokio::spawn(async move { likes.toggle_feed_like(Uuid::new_v4(), feed_id).await })
        })
        .collect();
    for task in tasks {
        assert!(task.await.unwrap().unwrap());
    }

    let (likes_count, _, _) = feed_counts(&pool, feed_id).await;
    assert_eq!(likes_count, 16);

    let row_count = FeedRepository::new(pool.clone())
        .count_likes(feed_id)
        .await
        .unwrap();
    assert_eq!(row_count, 16);
}

#[tokio::test]
async fn duplicate_report_conflicts_without_counter_effect() {
    let Some(pool) = test_pool().await else { return };
    let feed_id = seed_feed(&pool).await;
    let reports = ReportRepository::new(pool.clone());
    let user = Uuid::new_v4();

    let report = reports.report_feed(user, feed_id, "spam").await.unwrap();
    assert_eq!(report.target_id, feed_id);
    let (_, _, reported) = feed_counts(&pool, feed_id).await;
    assert_eq!(reported, 1);

    let err = reports.report_feed(user, feed_id, "spam again").await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    let (_, _, reported) = feed_counts(&pool, feed_id).await;
    assert_eq!(reported, 1, "duplicate report must not touch the counter");
}

#[tokio::test]
async fn toggle_on_missing_target_is_not_found() {
    let Some(pool) = test_pool().await else { return };
    let likes = LikeRepository::new(pool.clone());

    let err = likes
        .toggle_feed_like(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn comment_counters_select_exactly_one_level() {
    let Some(pool) = test_pool().await else { return };
    let feed_id = seed_feed(&pool).await;
    let comments = CommentRepository::new(pool.clone());
    let author = Uuid::new_v4();

    // Top-level comment: feed counter moves, nothing else
    let top = comments
        .create(feed_id, None, author, "first")
        .await
        .unwrap();
    let (_, comments_count, _) = feed_counts(&pool, feed_id).await;
    assert_eq!(comments_count, 1);
    assert_eq!(top.reply_count, 0);

    // Reply: parent counter moves, feed counter does not
    comments
        .create(feed_id, Some(top.id), author, "reply")
        .await
        .unwrap();
    let (_, comments_count, _) = feed_counts(&pool, feed_id).await;
    assert_eq!(comments_count, 1, "reply must not touch comments_count");
    let parent = comments.get(top.id).await.unwrap().unwrap();
    assert_eq!(parent.reply_count, 1);
}

#[tokio::test]
async fn deleting_top_level_comment_cascades_replies_once() {
    let Some(pool) = test_pool().await else { return };
    let feed_id = seed_feed(&pool).await;
    let comments = CommentRepository::new(pool.clone());
    let author = Uuid::new_v4();

    let top = comments
        .create(feed_id, None, author, "to be deleted")
        .await
        .unwrap();
    comments
        .create(feed_id, Some(top.id), author, "reply a")
        .await
        .unwrap();
    comments
        .create(feed_id, Some(top.id), author, "reply b")
        .await
        .unwrap();

    assert_eq!(comments.count_replies(top.id).await.unwrap(), 2);

    let top = comments.get(top.id).await.unwrap().unwrap();
    comments.delete(&top).await.unwrap();

    // Feed counter decremented exactly once; cascade removed the
    // replies without further counter adjustments.
    let (_, comments_count, _) = feed_counts(&pool, feed_id).await;
    assert_eq!(comments_count, 0);
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE feed_id = $1")
        .bind(feed_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0, "replies must be cascade-deleted");
}

#[tokio::test]
async fn repeated_delete_of_same_comment_moves_counter_once() {
    let Some(pool) = test_pool().await else { return };
    let feed_id = seed_feed(&pool).await;
    let comments = CommentRepository::new(pool.clone());
    let author = Uuid::new_v4();

    let kept = comments.create(feed_id, None, author, "kept").await.unwrap();
    let doomed = comments
        .create(feed_id, None, author, "doomed")
        .await
        .unwrap();
    let (_, comments_count, _) = feed_counts(&pool, feed_id).await;
    assert_eq!(comments_count, 2);

    // Two requests can race past the existence check with the same
    // snapshot of the row; only the one whose DELETE removes it may
    // move the counter.
    comments.delete(&doomed).await.unwrap();
    comments.delete(&doomed).await.unwrap();

    let (_, comments_count, _) = feed_counts(&pool, feed_id).await;
    assert_eq!(comments_count, 1, "counter must move once per removed row");
    assert!(comments.get(kept.id).await.unwrap().is_some());
}

#[tokio::test]
async fn engagement_read_reflects_viewer_state() {
    let Some(pool) = test_pool().await else { return };
    let feed_id = seed_feed(&pool).await;
    let service = EngagementService::new(
        FeedRepository::new(pool.clone()),
        CommentRepository::new(pool.clone()),
        LikeRepository::new(pool.clone()),
        ReportRepository::new(pool.clone()),
    );
    let user = Uuid::new_v4();

    let toggle = service
        .toggle_like(user, ContentRef::feed(feed_id))
        .await
        .unwrap();
    assert!(toggle.liked);

    let engagement = service.feed_engagement(feed_id, Some(user)).await.unwrap();
    assert_eq!(engagement.likes_count, 1);
    assert!(engagement.is_liked);
    assert!(!engagement.is_reported);

    let anonymous = service.feed_engagement(feed_id, None).await.unwrap();
    assert!(!anonymous.is_liked);
    assert_eq!(anonymous.likes_count, 1);
}
