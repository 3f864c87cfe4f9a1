use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::{validate_slug, validate_url};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub featured: bool,
    pub sort_order: i32,
    pub tech_stack: Vec<String>,
    pub github: Option<String>,
    pub private: bool,
    pub live_url: Option<String>,
    pub image: Option<String>,
    pub challenge: Option<String>,
    pub approach: Option<String>,
    pub impact: Option<String>,
    pub learnings: Option<String>,
    pub body: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFrontMatter {
    #[validate(length(min = 1))]
    pub title: String,

    pub description: String,

    #[validate(custom(function = "validate_slug"))]
    pub slug: String,

    #[serde(default)]
    pub featured: bool,

    #[serde(default, rename = "order")]
    pub sort_order: i32,

    #[serde(default)]
    pub tech_stack: Vec<String>,

    #[validate(custom(function = "validate_url"))]
    pub github: Option<String>,

    #[serde(default)]
    pub private: bool,

    #[validate(custom(function = "validate_url"))]
    pub live_url: Option<String>,

    pub image: Option<String>,
    pub challenge: Option<String>,
    pub approach: Option<String>,
    pub impact: Option<String>,
    pub learnings: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub featured: bool,
    pub tech_stack: Vec<String>,
    /// Hidden when the repository is private.
    pub github: Option<String>,
    pub live_url: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: Project,
    pub has_case_study: bool,
    pub content_html: String,
}

impl ProjectFrontMatter {
    pub fn into_project(self, body: String) -> Project {
        Project {
            id: None,
            title: self.title,
            description: self.description,
            slug: self.slug,
            featured: self.featured,
            sort_order: self.sort_order,
            tech_stack: self.tech_stack,
            github: self.github,
            private: self.private,
            live_url: self.live_url,
            image: self.image,
            challenge: self.challenge,
            approach: self.approach,
            impact: self.impact,
            learnings: self.learnings,
            body,
        }
    }
}

impl Project {
    pub fn has_case_study(&self) -> bool {
        [&self.challenge, &self.approach, &self.impact, &self.learnings]
            .iter()
            .any(|field| field.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }

    pub fn to_list_response(&self) -> ProjectListResponse {
        ProjectListResponse {
            title: self.title.clone(),
            description: self.description.clone(),
            slug: self.slug.clone(),
            featured: self.featured,
            tech_stack: self.tech_stack.clone(),
            github: if self.private { None } else { self.github.clone() },
            live_url: self.live_url.clone(),
            image: self.image.clone(),
        }
    }

    pub fn to_detail_response(&self, content_html: String) -> ProjectDetailResponse {
        let mut project = self.clone();
        if project.private {
            project.github = None;
        }
        ProjectDetailResponse {
            has_case_study: self.has_case_study(),
            project,
            content_html,
        }
    }
}

/// Stable sort by `sort_order`, lowest first.
pub fn sort_by_order(projects: &mut [Project]) {
    projects.sort_by_key(|p| p.sort_order);
}

/// Listing order requested by the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectSort {
    /// `sort_order` ascending.
    #[default]
    Default,
    /// Featured projects first, `sort_order` within each group.
    Featured,
    /// Title, case-insensitive.
    Alphabetical,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    /// A project matches when any of these is in its tech stack. Empty
    /// matches everything.
    pub tech: Vec<String>,
    pub sort: ProjectSort,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        self.tech.is_empty() || project.tech_stack.iter().any(|t| self.tech.contains(t))
    }
}

/// Applies `filter` to projects already in `sort_order`.
pub fn filter_projects(projects: Vec<Project>, filter: &ProjectFilter) -> Vec<Project> {
    let mut matched: Vec<Project> = projects.into_iter().filter(|p| filter.matches(p)).collect();

    match filter.sort {
        ProjectSort::Default => sort_by_order(&mut matched),
        ProjectSort::Featured => matched.sort_by_key(|p| !p.featured),
        ProjectSort::Alphabetical => matched.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.title.cmp(&b.title))
        }),
    }

    matched
}
