use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use validator::Validate;
use walkdir::WalkDir;

use crate::{
    collection::ContentCollection,
    entities::{
        blog_post::BlogPostFrontMatter,
        certification::reference_certifications,
        experience::ExperienceFrontMatter,
        project::ProjectFrontMatter,
        singletons::{AboutFrontMatter, NowFrontMatter, UsesFrontMatter},
        skill::SkillFrontMatter,
    },
    errors::AppError,
    utils::markdown::{is_content_file, read_content_file, split_front_matter},
};

const PROJECTS_DIR: &str = "projects";
const EXPERIENCE_DIR: &str = "experience";
const BLOG_DIR: &str = "blog";
const SKILLS_DIR: &str = "skills";
const NOW_DIR: &str = "now";
const ABOUT_STEM: &str = "about";
const USES_STEM: &str = "uses";

/// Reads the front-matter content tree rooted at `root`.
///
/// `projects/`, `experience/` and `blog/` are required; skills, the "now"
/// page and the `about`/`uses` singletons are optional.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    root: PathBuf,
}

/// A parsed content file: validated front matter plus the raw body.
struct Entry<T> {
    front_matter: T,
    body: String,
}

impl ContentLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ContentLoader { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn load(&self) -> Result<ContentCollection, AppError> {
        let projects = self.load_collection::<ProjectFrontMatter>(PROJECTS_DIR, true).await?;
        let experiences = self.load_collection::<ExperienceFrontMatter>(EXPERIENCE_DIR, true).await?;
        let blog_posts = self.load_collection::<BlogPostFrontMatter>(BLOG_DIR, true).await?;
        let skills = self.load_collection::<SkillFrontMatter>(SKILLS_DIR, false).await?;
        let now = self.load_collection::<NowFrontMatter>(NOW_DIR, false).await?;
        let about = self.load_singleton::<AboutFrontMatter>(ABOUT_STEM).await?;
        let uses = self.load_singleton::<UsesFrontMatter>(USES_STEM).await?;

        let collection = ContentCollection {
            projects: projects.into_iter().map(|e| e.front_matter.into_project(e.body)).collect(),
            experiences: experiences.into_iter().map(|e| e.front_matter.into_experience(e.body)).collect(),
            blog_posts: blog_posts.into_iter().map(|e| e.front_matter.into_post(e.body)).collect(),
            skills: skills.into_iter().map(|e| e.front_matter.into_skill(e.body)).collect(),
            now: now.into_iter().map(|e| e.front_matter.into_content(e.body)).collect(),
            about: about.map(|e| e.front_matter.into_content(e.body)),
            uses: uses.map(|e| e.front_matter.into_content(e.body)),
            certifications: reference_certifications(),
        };
        collection.check_unique_keys()?;

        info!(
            projects = collection.projects.len(),
            experiences = collection.experiences.len(),
            blog_posts = collection.blog_posts.len(),
            skills = collection.skills.len(),
            "Loaded static content from {}",
            self.root.display()
        );

        Ok(collection)
    }

    async fn load_collection<T>(&self, dir: &str, required: bool) -> Result<Vec<Entry<T>>, AppError>
    where
        T: DeserializeOwned + Validate,
    {
        let path = self.root.join(dir);
        if !path.is_dir() {
            if required {
                return Err(AppError::ContentLoad(format!(
                    "required content directory is missing: {}",
                    path.display()
                )));
            }
            debug!("Optional content directory {} not present", path.display());
            return Ok(Vec::new());
        }

        let files = collect_content_files(&path)?;
        try_join_all(files.iter().map(|file| parse_entry::<T>(file))).await
    }

    async fn load_singleton<T>(&self, stem: &str) -> Result<Option<Entry<T>>, AppError>
    where
        T: DeserializeOwned + Validate,
    {
        let candidates = ["mdx", "md", "markdown"].map(|ext| self.root.join(format!("{stem}.{ext}")));
        match candidates.iter().find(|p| p.is_file()) {
            Some(path) => parse_entry::<T>(path).await.map(Some),
            None => Ok(None),
        }
    }
}

/// Content files under `dir`, in file-name order.
fn collect_content_files(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| AppError::ContentLoad(format!("failed to walk {}: {}", dir.display(), e)))?;
        if entry.file_type().is_file() && is_content_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

async fn parse_entry<T>(path: &Path) -> Result<Entry<T>, AppError>
where
    T: DeserializeOwned + Validate,
{
    let in_file = |msg: String| AppError::ContentLoad(format!("{}: {}", path.display(), msg));

    let source = read_content_file(path).await.map_err(|e| in_file(e.to_string()))?;
    let (raw_front_matter, body) = split_front_matter(&source).map_err(|e| in_file(e.to_string()))?;

    let front_matter: T = serde_yaml::from_str(raw_front_matter).map_err(|e| in_file(e.to_string()))?;
    front_matter.validate().map_err(|e| in_file(e.to_string()))?;

    Ok(Entry {
        front_matter,
        body: body.to_string(),
    })
}
