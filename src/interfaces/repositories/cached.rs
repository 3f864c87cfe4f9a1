use std::{future::Future, time::Duration};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;
use tracing::trace;

use crate::{
    entities::{
        blog_post::BlogPost,
        certification::Certification,
        experience::Experience,
        project::Project,
        singletons::{AboutContent, NowContent, UsesContent},
        skill::Skill,
    },
    errors::AppError,
    repositories::{
        BlogPostRepository, ContentRepository, ExperienceRepository, PageRepository,
        ProjectRepository, SkillRepository,
    },
    settings::ContentSource,
};

/// Upper bound on live entries per result type.
pub const MAX_CACHE_ENTRIES: usize = 1024;

/// Time-boxed memo of query results keyed by query name and argument.
///
/// Entries are never invalidated early; errors are not cached. Expired
/// entries are dropped on read and swept once the map reaches
/// [`MAX_CACHE_ENTRIES`]; a full map of live entries stops taking inserts.
struct TtlCache<V> {
    ttl: Duration,
    entries: DashMap<String, (Instant, V)>,
}

impl<V: Clone> TtlCache<V> {
    fn new(ttl: Duration) -> Self {
        TtlCache {
            ttl,
            entries: DashMap::new(),
        }
    }

    fn get(&self, key: &str) -> Option<V> {
        if let Some(entry) = self.entries.get(key) {
            let (stored_at, value) = entry.value();
            if stored_at.elapsed() < self.ttl {
                return Some(value.clone());
            }
        }
        self.entries
            .remove_if(key, |_, (stored_at, _)| stored_at.elapsed() >= self.ttl);
        None
    }

    fn insert(&self, key: String, value: V) {
        if self.entries.len() >= MAX_CACHE_ENTRIES {
            self.entries.retain(|_, (stored_at, _)| stored_at.elapsed() < self.ttl);
        }
        if self.entries.len() >= MAX_CACHE_ENTRIES && !self.entries.contains_key(&key) {
            trace!(cache_key = %key, "content cache full, not storing");
            return;
        }
        self.entries.insert(key, (Instant::now(), value));
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Fetches on a miss and stores the value when `keep` accepts it.
    async fn get_or_fetch_if<F, Fut>(
        &self,
        key: String,
        fetch: F,
        keep: fn(&V) -> bool,
    ) -> Result<V, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, AppError>>,
    {
        if let Some(value) = self.get(&key) {
            trace!(cache_key = %key, "content cache hit");
            return Ok(value);
        }

        let value = fetch().await?;
        if keep(&value) {
            self.insert(key, value.clone());
        }
        Ok(value)
    }

    async fn get_or_fetch<F, Fut>(&self, key: String, fetch: F) -> Result<V, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, AppError>>,
    {
        self.get_or_fetch_if(key, fetch, |_| true).await
    }
}

/// Wraps any content repository with a read cache.
pub struct CachedContentRepo<R> {
    inner: R,
    projects: TtlCache<Vec<Project>>,
    project: TtlCache<Option<Project>>,
    experiences: TtlCache<Vec<Experience>>,
    posts: TtlCache<Vec<BlogPost>>,
    post: TtlCache<Option<BlogPost>>,
    strings: TtlCache<Vec<String>>,
    skills: TtlCache<Vec<Skill>>,
    now: TtlCache<Option<NowContent>>,
    about: TtlCache<Option<AboutContent>>,
    uses: TtlCache<Option<UsesContent>>,
    certifications: TtlCache<Vec<Certification>>,
}

impl<R: ContentRepository> CachedContentRepo<R> {
    pub fn new(inner: R, ttl: Duration) -> Self {
        CachedContentRepo {
            inner,
            projects: TtlCache::new(ttl),
            project: TtlCache::new(ttl),
            experiences: TtlCache::new(ttl),
            posts: TtlCache::new(ttl),
            post: TtlCache::new(ttl),
            strings: TtlCache::new(ttl),
            skills: TtlCache::new(ttl),
            now: TtlCache::new(ttl),
            about: TtlCache::new(ttl),
            uses: TtlCache::new(ttl),
            certifications: TtlCache::new(ttl),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Entries currently held across every result type, live or not yet swept.
    pub fn cached_entries(&self) -> usize {
        self.projects.len()
            + self.project.len()
            + self.experiences.len()
            + self.posts.len()
            + self.post.len()
            + self.strings.len()
            + self.skills.len()
            + self.now.len()
            + self.about.len()
            + self.uses.len()
            + self.certifications.len()
    }
}

#[async_trait]
impl<R: ContentRepository> ProjectRepository for CachedContentRepo<R> {
    async fn get_projects(&self) -> Result<Vec<Project>, AppError> {
        self.projects.get_or_fetch("projects".into(), || self.inner.get_projects()).await
    }

    async fn get_featured_projects(&self) -> Result<Vec<Project>, AppError> {
        self.projects
            .get_or_fetch("featured-projects".into(), || self.inner.get_featured_projects())
            .await
    }

    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError> {
        self.project
            .get_or_fetch_if(
                format!("project:{slug}"),
                || self.inner.get_project_by_slug(slug),
                Option::is_some,
            )
            .await
    }

    async fn get_all_project_tech_stack(&self) -> Result<Vec<String>, AppError> {
        self.strings
            .get_or_fetch("project-tech-stack".into(), || self.inner.get_all_project_tech_stack())
            .await
    }
}

#[async_trait]
impl<R: ContentRepository> ExperienceRepository for CachedContentRepo<R> {
    async fn get_experiences(&self) -> Result<Vec<Experience>, AppError> {
        self.experiences
            .get_or_fetch("experiences".into(), || self.inner.get_experiences())
            .await
    }
}

#[async_trait]
impl<R: ContentRepository> BlogPostRepository for CachedContentRepo<R> {
    async fn get_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        self.posts.get_or_fetch("blog-posts".into(), || self.inner.get_blog_posts()).await
    }

    async fn get_featured_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        self.posts
            .get_or_fetch("featured-blog-posts".into(), || self.inner.get_featured_blog_posts())
            .await
    }

    async fn get_blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, AppError> {
        self.post
            .get_or_fetch_if(
                format!("blog-post:{slug}"),
                || self.inner.get_blog_post_by_slug(slug),
                Option::is_some,
            )
            .await
    }

    async fn get_all_blog_tags(&self) -> Result<Vec<String>, AppError> {
        self.strings
            .get_or_fetch("blog-tags".into(), || self.inner.get_all_blog_tags())
            .await
    }

    async fn get_posts_by_tag(&self, tag: &str) -> Result<Vec<BlogPost>, AppError> {
        self.posts
            .get_or_fetch_if(
                format!("posts-by-tag:{}", tag.to_lowercase()),
                || self.inner.get_posts_by_tag(tag),
                |posts| !posts.is_empty(),
            )
            .await
    }
}

#[async_trait]
impl<R: ContentRepository> SkillRepository for CachedContentRepo<R> {
    async fn get_skills(&self) -> Result<Vec<Skill>, AppError> {
        self.skills.get_or_fetch("skills".into(), || self.inner.get_skills()).await
    }
}

#[async_trait]
impl<R: ContentRepository> PageRepository for CachedContentRepo<R> {
    async fn get_now_content(&self) -> Result<Option<NowContent>, AppError> {
        self.now.get_or_fetch("now".into(), || self.inner.get_now_content()).await
    }

    async fn get_about_content(&self) -> Result<Option<AboutContent>, AppError> {
        self.about.get_or_fetch("about".into(), || self.inner.get_about_content()).await
    }

    async fn get_uses_content(&self) -> Result<Option<UsesContent>, AppError> {
        self.uses.get_or_fetch("uses".into(), || self.inner.get_uses_content()).await
    }

    async fn get_certifications(&self) -> Result<Vec<Certification>, AppError> {
        self.certifications
            .get_or_fetch("certifications".into(), || self.inner.get_certifications())
            .await
    }
}

#[async_trait]
impl<R: ContentRepository> ContentRepository for CachedContentRepo<R> {
    fn source(&self) -> ContentSource {
        self.inner.source()
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        self.inner.check_connection().await
    }
}
