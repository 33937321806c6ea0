use crate::error::Result;
use sqlx::PgPool;

/// Repository for the prohibited-word reference set.
#[derive(Clone)]
pub struct ProhibitedWordRepository {
    pool: PgPool,
}

impl ProhibitedWordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all prohibited words
    pub async fn list_words(&self) -> Result<Vec<String>> {
        let words: Vec<String> = sqlx::query_scalar("SELECT word FROM prohibited_words ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(words)
    }
}
