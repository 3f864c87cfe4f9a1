use async_trait::async_trait;
use sqlx::PgPool;

use crate::{errors::AppError, repositories::ContentRepository, settings::ContentSource};

/// Reads content from Postgres.
#[derive(Clone)]
pub struct SqlxContentRepo {
    pub pool: PgPool,
}

/// Writes content into Postgres during seeding.
#[derive(Clone)]
pub struct SqlxSeedStore {
    pub pool: PgPool,
}

impl SqlxContentRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxContentRepo { pool }
    }
}

impl SqlxSeedStore {
    pub fn new(pool: PgPool) -> Self {
        SqlxSeedStore { pool }
    }
}

#[async_trait]
impl ContentRepository for SqlxContentRepo {
    fn source(&self) -> ContentSource {
        ContentSource::Database
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }
}
