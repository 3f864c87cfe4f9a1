use async_trait::async_trait;

use crate::{
    entities::{
        certification::Certification,
        singletons::{AboutContent, NowContent, UsesContent},
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxContentRepo,
};

#[async_trait]
pub trait PageRepository: Send + Sync {
    /// Retrieves the "now" page, if one exists
    async fn get_now_content(&self) -> Result<Option<NowContent>, AppError>;

    /// Retrieves the "about" page, if one exists
    async fn get_about_content(&self) -> Result<Option<AboutContent>, AppError>;

    /// Retrieves the "uses" page, if one exists
    async fn get_uses_content(&self) -> Result<Option<UsesContent>, AppError>;

    async fn get_certifications(&self) -> Result<Vec<Certification>, AppError>;
}

#[async_trait]
impl PageRepository for SqlxContentRepo {
    async fn get_now_content(&self) -> Result<Option<NowContent>, AppError> {
        let now = sqlx::query_as::<_, NowContent>(
            "SELECT id, title, last_updated, body FROM now_content LIMIT 1"
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(now)
    }

    async fn get_about_content(&self) -> Result<Option<AboutContent>, AppError> {
        let about = sqlx::query_as::<_, AboutContent>(
            r#"
            SELECT id, title, description, "current_role", current_company, location, focus_areas, body
            FROM about_content
            LIMIT 1
            "#
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(about)
    }

    async fn get_uses_content(&self) -> Result<Option<UsesContent>, AppError> {
        let uses = sqlx::query_as::<_, UsesContent>(
            "SELECT id, title, body FROM uses_content LIMIT 1"
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(uses)
    }

    async fn get_certifications(&self) -> Result<Vec<Certification>, AppError> {
        let certifications = sqlx::query_as::<_, Certification>(
            "SELECT id, name, abbreviation, issuer FROM certifications ORDER BY created_at ASC, name ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(certifications)
    }
}
