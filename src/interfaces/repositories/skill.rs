use async_trait::async_trait;

use crate::{
    entities::skill::{sort_by_category, Skill},
    errors::AppError,
    repositories::sqlx_repo::SqlxContentRepo,
};

#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Skills ordered by category, then order within the category.
    async fn get_skills(&self) -> Result<Vec<Skill>, AppError>;
}

#[async_trait]
impl SkillRepository for SqlxContentRepo {
    async fn get_skills(&self) -> Result<Vec<Skill>, AppError> {
        let mut skills = sqlx::query_as::<_, Skill>(
            r#"
            SELECT id, name, category, category_slug, proficiency, sort_order, body
            FROM skills
            ORDER BY category ASC, sort_order ASC, name ASC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        // Database collation may disagree with byte order on category names.
        sort_by_category(&mut skills);

        Ok(skills)
    }
}
