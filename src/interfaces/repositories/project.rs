use async_trait::async_trait;

use crate::{
    entities::project::Project,
    errors::AppError,
    repositories::{collect_tech_stack, sqlx_repo::SqlxContentRepo},
};

const PROJECT_COLUMNS: &str = "id, title, description, slug, featured, sort_order, tech_stack, \
    github, private, live_url, image, challenge, approach, impact, learnings, body";

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// All projects, `sort_order` ascending.
    async fn get_projects(&self) -> Result<Vec<Project>, AppError>;

    /// Featured projects, `sort_order` ascending.
    async fn get_featured_projects(&self) -> Result<Vec<Project>, AppError>;

    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError>;

    /// Every distinct tech stack entry, sorted.
    async fn get_all_project_tech_stack(&self) -> Result<Vec<String>, AppError>;
}

#[async_trait]
impl ProjectRepository for SqlxContentRepo {
    async fn get_projects(&self) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY sort_order ASC, source_position ASC, slug ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn get_featured_projects(&self) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE featured = TRUE \
             ORDER BY sort_order ASC, source_position ASC, slug ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE slug = $1 LIMIT 1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn get_all_project_tech_stack(&self) -> Result<Vec<String>, AppError> {
        let stacks: Vec<Vec<String>> = sqlx::query_scalar("SELECT tech_stack FROM projects")
            .fetch_all(&self.pool)
            .await?;

        Ok(collect_tech_stack(stacks.iter().map(Vec::as_slice)))
    }
}
