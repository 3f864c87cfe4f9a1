use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::{deserialize_date, deserialize_optional_date, validate_slug, validate_tags};

// ───── Constants ──────────────────────────────────────────────────────
const MAX_TITLE_LENGTH: u64 = 100;
const MAX_DESCRIPTION_LENGTH: u64 = 200;
pub const WORDS_PER_MINUTE: usize = 200;

// ───── Domain Model ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlogPost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub published_date: NaiveDate,
    pub updated_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub reading_time: i32,
    pub body: String,
}

// ───── Front Matter ─────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostFrontMatter {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub description: String,

    #[validate(custom(function = "validate_slug"))]
    pub slug: String,

    #[serde(deserialize_with = "deserialize_date")]
    pub published_date: NaiveDate,

    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub updated_date: Option<NaiveDate>,

    #[serde(default)]
    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<String>,

    #[serde(default)]
    pub featured: bool,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BlogPostListResponse {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub published_date: NaiveDate,
    pub updated_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub reading_time: i32,
}

#[derive(Debug, Serialize)]
pub struct BlogPostDetailResponse {
    #[serde(flatten)]
    pub post: BlogPost,
    pub content_html: String,
}

/// Minutes needed to read `body`, rounded up, never below one.
pub fn reading_time(body: &str) -> i32 {
    let words = body.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as i32
}

impl BlogPostFrontMatter {
    pub fn into_post(self, body: String) -> BlogPost {
        BlogPost {
            id: None,
            reading_time: reading_time(&body),
            title: self.title,
            description: self.description,
            slug: self.slug,
            published_date: self.published_date,
            updated_date: self.updated_date,
            tags: self.tags,
            featured: self.featured,
            body,
        }
    }
}

impl BlogPost {
    pub fn has_tag_ignore_case(&self, tag: &str) -> bool {
        let wanted = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == wanted)
    }

    pub fn last_modified(&self) -> NaiveDate {
        self.updated_date.unwrap_or(self.published_date)
    }

    pub fn to_list_response(&self) -> BlogPostListResponse {
        BlogPostListResponse {
            title: self.title.clone(),
            description: self.description.clone(),
            slug: self.slug.clone(),
            published_date: self.published_date,
            updated_date: self.updated_date,
            tags: self.tags.clone(),
            featured: self.featured,
            reading_time: self.reading_time,
        }
    }

    pub fn to_detail_response(&self, content_html: String) -> BlogPostDetailResponse {
        BlogPostDetailResponse {
            post: self.clone(),
            content_html,
        }
    }
}

/// Stable sort by published date, newest first.
pub fn sort_by_published_desc(posts: &mut [BlogPost]) {
    posts.sort_by(|a, b| b.published_date.cmp(&a.published_date));
}
