use async_trait::async_trait;

use crate::{entities::experience::Experience, errors::AppError, repositories::sqlx_repo::SqlxContentRepo};

#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    /// Timeline entries, `sort_order` ascending.
    async fn get_experiences(&self) -> Result<Vec<Experience>, AppError>;
}

#[async_trait]
impl ExperienceRepository for SqlxContentRepo {
    async fn get_experiences(&self) -> Result<Vec<Experience>, AppError> {
        let experiences = sqlx::query_as::<_, Experience>(
            r#"
            SELECT id, company, role, start_date, end_date, location, sort_order, body
            FROM experiences
            ORDER BY sort_order ASC, source_position ASC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(experiences)
    }
}
