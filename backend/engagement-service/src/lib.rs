/// Engagement Service Library
///
/// Keeps denormalized engagement counters (likes, comments, replies,
/// moderation reports) exactly in sync with their relation rows, and
/// exposes the toggle/report/comment operations that mutate them.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and the identity extractor
/// - `domain`: row structs and content references
/// - `services`: business logic (toggles, reports, comment counters, reference cache)
/// - `repository`: database access layer, one transaction per mutation
/// - `error`: error types and HTTP mapping
/// - `config`: configuration management
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod repository;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
