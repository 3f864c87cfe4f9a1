use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use crate::{
    collection::ContentCollection,
    entities::{
        blog_post::BlogPost,
        certification::Certification,
        experience::Experience,
        project::Project,
        singletons::{AboutContent, NowContent, UsesContent},
        skill::Skill,
    },
    errors::AppError,
};

/// Insert-or-update sink keyed on each entity's natural key.
#[async_trait]
pub trait SeedStore: Send + Sync {
    /// Keyed on slug. `position` is the record's index in the collection
    /// and breaks ordering ties the way file order does.
    async fn upsert_project(&self, project: &Project, position: i32) -> Result<(), AppError>;

    /// Keyed on (company, role, start date).
    async fn upsert_experience(&self, experience: &Experience, position: i32) -> Result<(), AppError>;

    /// Keyed on slug.
    async fn upsert_blog_post(&self, post: &BlogPost, position: i32) -> Result<(), AppError>;

    /// Keyed on name.
    async fn upsert_skill(&self, skill: &Skill) -> Result<(), AppError>;

    async fn upsert_now(&self, now: &NowContent) -> Result<(), AppError>;

    async fn upsert_about(&self, about: &AboutContent) -> Result<(), AppError>;

    async fn upsert_uses(&self, uses: &UsesContent) -> Result<(), AppError>;

    /// Keyed on name.
    async fn upsert_certification(&self, certification: &Certification) -> Result<(), AppError>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub projects: usize,
    pub experiences: usize,
    pub blog_posts: usize,
    pub skills: usize,
    pub now: usize,
    pub about: usize,
    pub uses: usize,
    pub certifications: usize,
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Projects: {}", self.projects)?;
        writeln!(f, "Experiences: {}", self.experiences)?;
        writeln!(f, "Blog posts: {}", self.blog_posts)?;
        writeln!(f, "Skills: {}", self.skills)?;
        writeln!(f, "Now content: {}", self.now)?;
        writeln!(f, "About content: {}", self.about)?;
        writeln!(f, "Uses content: {}", self.uses)?;
        write!(f, "Certifications: {}", self.certifications)
    }
}

/// One-directional sync of a content collection into a store.
pub struct ContentSeeder<S>
where
    S: SeedStore,
{
    pub store: S,
}

impl<S> ContentSeeder<S>
where
    S: SeedStore,
{
    pub fn new(store: S) -> Self {
        ContentSeeder { store }
    }

    /// Upserts every record. The first failure aborts the run; rows already
    /// written stay written.
    pub async fn seed(&self, content: &ContentCollection) -> Result<SeedReport, AppError> {
        let mut report = SeedReport::default();

        info!("Seeding {} projects...", content.projects.len());
        for (project, position) in content.projects.iter().zip(0..) {
            self.store.upsert_project(project, position).await?;
            report.projects += 1;
        }

        info!("Seeding {} experiences...", content.experiences.len());
        for (experience, position) in content.experiences.iter().zip(0..) {
            self.store.upsert_experience(experience, position).await?;
            report.experiences += 1;
        }

        info!("Seeding {} blog posts...", content.blog_posts.len());
        for (post, position) in content.blog_posts.iter().zip(0..) {
            self.store.upsert_blog_post(post, position).await?;
            report.blog_posts += 1;
        }

        info!("Seeding {} skills...", content.skills.len());
        for skill in &content.skills {
            self.store.upsert_skill(skill).await?;
            report.skills += 1;
        }

        if let Some(now) = content.now.first() {
            self.store.upsert_now(now).await?;
            report.now = 1;
        }
        if let Some(about) = &content.about {
            self.store.upsert_about(about).await?;
            report.about = 1;
        }
        if let Some(uses) = &content.uses {
            self.store.upsert_uses(uses).await?;
            report.uses = 1;
        }

        info!("Seeding {} certifications...", content.certifications.len());
        for certification in &content.certifications {
            self.store.upsert_certification(certification).await?;
            report.certifications += 1;
        }

        Ok(report)
    }
}
