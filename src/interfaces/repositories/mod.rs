pub mod blog_post;
pub mod cached;
pub mod experience;
pub mod pages;
pub mod project;
pub mod seed_store;
pub mod skill;
pub mod sqlx_repo;
pub mod static_repo;

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::{errors::AppError, settings::ContentSource};

pub use blog_post::BlogPostRepository;
pub use experience::ExperienceRepository;
pub use pages::PageRepository;
pub use project::ProjectRepository;
pub use skill::SkillRepository;

/// Source-agnostic read access to every content type.
///
/// Both sources must honour the same ordering and filtering contracts;
/// callers never learn which one is active.
#[async_trait]
pub trait ContentRepository:
    ProjectRepository + ExperienceRepository + BlogPostRepository + SkillRepository + PageRepository
{
    fn source(&self) -> ContentSource;

    /// Verifies the backing store is reachable.
    async fn check_connection(&self) -> Result<(), AppError>;
}

/// Deduplicated, lower-cased, alphabetically sorted tags.
pub fn collect_blog_tags<'a, I>(tag_lists: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    tag_lists
        .into_iter()
        .flatten()
        .map(|tag| tag.to_lowercase())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Deduplicated, sorted tech stack entries; casing is preserved.
pub fn collect_tech_stack<'a, I>(stacks: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    stacks
        .into_iter()
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
