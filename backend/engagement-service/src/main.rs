use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;

use engagement_service::config::Config;
use engagement_service::handlers::{self, AppState};
use engagement_service::repository::{
    CategoryRepository, CommentRepository, FeedRepository, LikeRepository,
    ProhibitedWordRepository, ReportRepository,
};
use engagement_service::services::{CommentService, EngagementService, ReferenceDataService};

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting engagement-service");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Configuration loaded: env={}, http_port={}",
        config.app.env, config.app.http_port
    );

    // Initialize database pool
    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    // Verify database connection
    sqlx::query("SELECT 1")
        .execute(&pg_pool)
        .await
        .context("Failed to verify database connection")?;
    info!("Database pool created and verified");

    // Run database migrations
    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations completed");

    // Initialize Redis connection
    let redis_client =
        redis::Client::open(config.redis.url.as_str()).context("Failed to create Redis client")?;
    let redis_conn = redis::aio::ConnectionManager::new(redis_client)
        .await
        .context("Failed to connect to Redis")?;
    info!("Redis connection established");

    // Wire repositories and services
    let feeds = FeedRepository::new(pg_pool.clone());
    let comments_repo = CommentRepository::new(pg_pool.clone());
    let likes = LikeRepository::new(pg_pool.clone());
    let reports = ReportRepository::new(pg_pool.clone());
    let categories = CategoryRepository::new(pg_pool.clone());
    let words = ProhibitedWordRepository::new(pg_pool.clone());

    let reference = ReferenceDataService::new(
        redis_conn,
        categories,
        words,
        config.app.env.clone(),
        config.cache.reference_ttl_secs,
    );
    let engagement = EngagementService::new(
        feeds.clone(),
        comments_repo.clone(),
        likes,
        reports,
    );
    let comments = CommentService::new(comments_repo, feeds, reference.clone());

    let state = AppState {
        engagement,
        comments,
        reference,
    };

    let bind_addr = format!("{}:{}", config.app.host, config.app.http_port);
    info!("HTTP server listening on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .route("/health", web::get().to(health))
            .configure(handlers::configure)
    })
    .bind(&bind_addr)
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")?;

    Ok(())
}
