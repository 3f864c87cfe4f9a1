use std::collections::HashSet;

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
};

/// Every piece of site content, as read from one source.
#[derive(Debug, Clone, Default)]
pub struct ContentCollection {
    pub projects: Vec<Project>,
    pub experiences: Vec<Experience>,
    pub blog_posts: Vec<BlogPost>,
    pub skills: Vec<Skill>,
    pub now: Vec<NowContent>,
    pub about: Option<AboutContent>,
    pub uses: Option<UsesContent>,
    pub certifications: Vec<Certification>,
}

impl ContentCollection {
    /// Rejects collections whose natural keys collide.
    pub fn check_unique_keys(&self) -> Result<(), AppError> {
        ensure_unique("project slug", self.projects.iter().map(|p| p.slug.as_str()))?;
        ensure_unique("blog post slug", self.blog_posts.iter().map(|p| p.slug.as_str()))?;
        ensure_unique("skill name", self.skills.iter().map(|s| s.name.as_str()))?;
        Ok(())
    }
}

fn ensure_unique<'a>(kind: &str, keys: impl Iterator<Item = &'a str>) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(AppError::ContentLoad(format!("duplicate {kind}: {key}")));
        }
    }
    Ok(())
}
