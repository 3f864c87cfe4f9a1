use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    entities::{
        blog_post::{BlogPost, BlogPostDetailResponse},
        certification::Certification,
        experience::{current_experience, Experience},
        project::{filter_projects, Project, ProjectDetailResponse, ProjectFilter},
        singletons::{AboutContent, NowContent, PageResponse, UsesContent},
        skill::{group_by_category, sort_skills, Skill, SkillCategory},
    },
    errors::AppError,
    repositories::ContentRepository,
    settings::ContentSource,
    use_cases::{
        related::rank_related_posts,
        sitemap::{build_sitemap, SitemapEntry},
    },
    utils::markdown::BodyRenderer,
};

/// Read facade over whichever content repository was selected at startup.
#[derive(Clone)]
pub struct ContentHandler {
    pub repo: Arc<dyn ContentRepository>,
    pub renderer: Arc<dyn BodyRenderer>,
}

impl ContentHandler {
    pub fn new(repo: Arc<dyn ContentRepository>, renderer: Arc<dyn BodyRenderer>) -> Self {
        ContentHandler { repo, renderer }
    }

    pub fn source(&self) -> ContentSource {
        self.repo.source()
    }

    pub async fn check_connection(&self) -> Result<(), AppError> {
        self.repo.check_connection().await
    }

    // ───── Projects ─────────────────────────────────────────────────

    /// All or featured projects, narrowed by tech and re-sorted per `filter`.
    pub async fn list_projects(&self, featured: bool, filter: &ProjectFilter) -> Result<Vec<Project>, AppError> {
        let projects = if featured {
            self.repo.get_featured_projects().await?
        } else {
            self.repo.get_projects().await?
        };

        Ok(filter_projects(projects, filter))
    }

    pub async fn find_project(&self, slug: &str) -> Result<Option<Project>, AppError> {
        self.repo.get_project_by_slug(slug).await
    }

    /// Retrieves a project with its rendered body
    pub async fn get_project_detail(&self, slug: &str) -> Result<ProjectDetailResponse, AppError> {
        let project = self
            .find_project(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project '{}' not found", slug)))?;

        Ok(project.to_detail_response(self.renderer.render(&project.body)))
    }

    pub async fn get_all_project_tech_stack(&self) -> Result<Vec<String>, AppError> {
        self.repo.get_all_project_tech_stack().await
    }

    // ───── Experiences ──────────────────────────────────────────────

    pub async fn get_experiences(&self) -> Result<Vec<Experience>, AppError> {
        self.repo.get_experiences().await
    }

    pub async fn get_current_experience(&self) -> Result<Option<Experience>, AppError> {
        let experiences = self.repo.get_experiences().await?;
        Ok(current_experience(&experiences).cloned())
    }

    // ───── Blog Posts ───────────────────────────────────────────────

    pub async fn get_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        self.repo.get_blog_posts().await
    }

    pub async fn get_featured_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        self.repo.get_featured_blog_posts().await
    }

    pub async fn find_blog_post(&self, slug: &str) -> Result<Option<BlogPost>, AppError> {
        self.repo.get_blog_post_by_slug(slug).await
    }

    /// Retrieves a blog post with its rendered body
    pub async fn get_blog_post_detail(&self, slug: &str) -> Result<BlogPostDetailResponse, AppError> {
        let post = self
            .find_blog_post(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Blog post '{}' not found", slug)))?;

        Ok(post.to_detail_response(self.renderer.render(&post.body)))
    }

    pub async fn get_all_blog_tags(&self) -> Result<Vec<String>, AppError> {
        self.repo.get_all_blog_tags().await
    }

    pub async fn get_posts_by_tag(&self, tag: &str) -> Result<Vec<BlogPost>, AppError> {
        self.repo.get_posts_by_tag(tag).await
    }

    /// Up to `limit` posts related to `slug`; empty when the slug is unknown.
    pub async fn get_related_posts(&self, slug: &str, limit: usize) -> Result<Vec<BlogPost>, AppError> {
        let posts = self.repo.get_blog_posts().await?;
        Ok(rank_related_posts(&posts, slug, limit))
    }

    // ───── Skills & Certifications ──────────────────────────────────

    pub async fn get_skills(&self) -> Result<Vec<Skill>, AppError> {
        self.repo.get_skills().await
    }

    /// Flat skill list ranked by proficiency rather than category.
    pub async fn get_skills_by_proficiency(&self) -> Result<Vec<Skill>, AppError> {
        let mut skills = self.repo.get_skills().await?;
        sort_skills(&mut skills);
        Ok(skills)
    }

    pub async fn get_skill_categories(&self) -> Result<Vec<SkillCategory>, AppError> {
        let skills = self.repo.get_skills().await?;
        Ok(group_by_category(skills))
    }

    pub async fn get_certifications(&self) -> Result<Vec<Certification>, AppError> {
        self.repo.get_certifications().await
    }

    // ───── Singleton Pages ──────────────────────────────────────────

    pub async fn get_now_content(&self) -> Result<Option<NowContent>, AppError> {
        self.repo.get_now_content().await
    }

    pub async fn get_now_page(&self) -> Result<PageResponse<NowContent>, AppError> {
        let now = self
            .get_now_content()
            .await?
            .ok_or_else(|| AppError::NotFound("Now page not found".to_string()))?;
        Ok(self.page_response(now.body.clone(), now))
    }

    pub async fn get_about_page(&self) -> Result<PageResponse<AboutContent>, AppError> {
        let about = self
            .repo
            .get_about_content()
            .await?
            .ok_or_else(|| AppError::NotFound("About page not found".to_string()))?;
        Ok(self.page_response(about.body.clone(), about))
    }

    pub async fn get_uses_page(&self) -> Result<PageResponse<UsesContent>, AppError> {
        let uses = self
            .repo
            .get_uses_content()
            .await?
            .ok_or_else(|| AppError::NotFound("Uses page not found".to_string()))?;
        Ok(self.page_response(uses.body.clone(), uses))
    }

    fn page_response<T: serde::Serialize>(&self, body: String, page: T) -> PageResponse<T> {
        PageResponse {
            content_html: self.renderer.render(&body),
            page,
        }
    }

    // ───── Sitemap ──────────────────────────────────────────────────

    pub async fn sitemap(&self, base_url: &str, today: NaiveDate) -> Result<Vec<SitemapEntry>, AppError> {
        let (projects, now, posts) = futures::try_join!(
            self.repo.get_projects(),
            self.repo.get_now_content(),
            self.repo.get_blog_posts(),
        )?;

        Ok(build_sitemap(base_url, today, &projects, now.as_ref(), &posts))
    }
}
