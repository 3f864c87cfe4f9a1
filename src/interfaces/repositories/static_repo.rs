use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    collection::ContentCollection,
    entities::{
        blog_post::{sort_by_published_desc, BlogPost},
        certification::Certification,
        experience::Experience,
        project::{sort_by_order, Project},
        singletons::{AboutContent, NowContent, UsesContent},
        skill::{sort_by_category, Skill},
    },
    errors::AppError,
    repositories::{
        collect_blog_tags, collect_tech_stack, BlogPostRepository, ContentRepository,
        ExperienceRepository, PageRepository, ProjectRepository, SkillRepository,
    },
    settings::ContentSource,
};

/// Serves an immutable, pre-sorted content collection loaded at startup.
#[derive(Clone)]
pub struct StaticContentRepo {
    content: Arc<ContentCollection>,
}

impl StaticContentRepo {
    pub fn new(mut content: ContentCollection) -> Self {
        sort_by_order(&mut content.projects);
        content.experiences.sort_by_key(|e| e.sort_order);
        sort_by_published_desc(&mut content.blog_posts);
        sort_by_category(&mut content.skills);

        StaticContentRepo {
            content: Arc::new(content),
        }
    }

    pub fn collection(&self) -> &ContentCollection {
        &self.content
    }
}

#[async_trait]
impl ProjectRepository for StaticContentRepo {
    async fn get_projects(&self) -> Result<Vec<Project>, AppError> {
        Ok(self.content.projects.clone())
    }

    async fn get_featured_projects(&self) -> Result<Vec<Project>, AppError> {
        Ok(self.content.projects.iter().filter(|p| p.featured).cloned().collect())
    }

    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError> {
        Ok(self.content.projects.iter().find(|p| p.slug == slug).cloned())
    }

    async fn get_all_project_tech_stack(&self) -> Result<Vec<String>, AppError> {
        Ok(collect_tech_stack(self.content.projects.iter().map(|p| p.tech_stack.as_slice())))
    }
}

#[async_trait]
impl ExperienceRepository for StaticContentRepo {
    async fn get_experiences(&self) -> Result<Vec<Experience>, AppError> {
        Ok(self.content.experiences.clone())
    }
}

#[async_trait]
impl BlogPostRepository for StaticContentRepo {
    async fn get_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        Ok(self.content.blog_posts.clone())
    }

    async fn get_featured_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        Ok(self.content.blog_posts.iter().filter(|p| p.featured).cloned().collect())
    }

    async fn get_blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, AppError> {
        Ok(self.content.blog_posts.iter().find(|p| p.slug == slug).cloned())
    }

    async fn get_all_blog_tags(&self) -> Result<Vec<String>, AppError> {
        Ok(collect_blog_tags(self.content.blog_posts.iter().map(|p| p.tags.as_slice())))
    }

    async fn get_posts_by_tag(&self, tag: &str) -> Result<Vec<BlogPost>, AppError> {
        Ok(self
            .content
            .blog_posts
            .iter()
            .filter(|p| p.has_tag_ignore_case(tag))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SkillRepository for StaticContentRepo {
    async fn get_skills(&self) -> Result<Vec<Skill>, AppError> {
        Ok(self.content.skills.clone())
    }
}

#[async_trait]
impl PageRepository for StaticContentRepo {
    async fn get_now_content(&self) -> Result<Option<NowContent>, AppError> {
        Ok(self.content.now.first().cloned())
    }

    async fn get_about_content(&self) -> Result<Option<AboutContent>, AppError> {
        Ok(self.content.about.clone())
    }

    async fn get_uses_content(&self) -> Result<Option<UsesContent>, AppError> {
        Ok(self.content.uses.clone())
    }

    async fn get_certifications(&self) -> Result<Vec<Certification>, AppError> {
        Ok(self.content.certifications.clone())
    }
}

#[async_trait]
impl ContentRepository for StaticContentRepo {
    fn source(&self) -> ContentSource {
        ContentSource::Static
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }
}
