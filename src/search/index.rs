use std::path::Path;

use async_trait::async_trait;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::{
    collection::ContentCollection,
    errors::SearchError,
    utils::markdown::markdown_to_plain_text,
};

const EXCERPT_LEAD_CHARS: usize = 60;
const EXCERPT_MAX_CHARS: usize = 180;
const TITLE_WEIGHT: usize = 3;

/// One document in the prebuilt search artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub url: String,
    pub title: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub hit_type: Option<String>,
}

/// Raw ranked hit as returned by an index, before classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexHit {
    pub url: String,
    pub meta: HitMeta,
    pub excerpt: String,
}

#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Ranked hits for a free-text query.
    async fn search(&self, query: &str) -> Result<Vec<IndexHit>, SearchError>;
}

/// In-memory index over the JSON artifact written by `build-search-index`.
#[derive(Debug, Clone, Default)]
pub struct StaticSearchIndex {
    records: Vec<IndexRecord>,
}

impl StaticSearchIndex {
    pub fn new(records: Vec<IndexRecord>) -> Self {
        StaticSearchIndex { records }
    }

    pub fn from_json(raw: &str) -> Result<Self, SearchError> {
        let records: Vec<IndexRecord> =
            serde_json::from_str(raw).map_err(|e| SearchError::MalformedIndex(e.to_string()))?;
        Ok(StaticSearchIndex::new(records))
    }

    pub async fn load(path: &Path) -> Result<Self, SearchError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SearchError::IndexUnavailable(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }

    pub fn records(&self) -> &[IndexRecord] {
        &self.records
    }

    fn query_pattern(terms: &[String]) -> Result<Regex, SearchError> {
        let alternation = terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        RegexBuilder::new(&alternation)
            .case_insensitive(true)
            .build()
            .map_err(|e| SearchError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl SearchIndex for StaticSearchIndex {
    async fn search(&self, query: &str) -> Result<Vec<IndexHit>, SearchError> {
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() {
            return Ok(Vec::new());
        }
        let pattern = Self::query_pattern(&terms)?;

        let mut scored: Vec<(usize, &IndexRecord)> = self
            .records
            .iter()
            .filter_map(|record| {
                let score = pattern.find_iter(&record.title).count() * TITLE_WEIGHT
                    + pattern.find_iter(&record.content).count();
                (score > 0).then_some((score, record))
            })
            .collect();
        scored.sort_by(|(a, ra), (b, rb)| b.cmp(a).then_with(|| ra.url.cmp(&rb.url)));

        Ok(scored
            .into_iter()
            .map(|(_, record)| IndexHit {
                url: record.url.clone(),
                meta: HitMeta {
                    title: Some(record.title.clone()).filter(|t| !t.is_empty()),
                    hit_type: Some(record.record_type.clone()),
                },
                excerpt: highlight_excerpt(&record.content, &pattern),
            })
            .collect())
    }
}

/// Window of `content` around the first match, HTML-escaped, with every
/// match wrapped in `<mark>`.
pub fn highlight_excerpt(content: &str, pattern: &Regex) -> String {
    let first = pattern.find(content).map(|m| m.start()).unwrap_or(0);
    let start = floor_char_boundary(content, first.saturating_sub(EXCERPT_LEAD_CHARS));
    let end = floor_char_boundary(content, (start + EXCERPT_MAX_CHARS).min(content.len()));
    let window = &content[start..end];

    let mut excerpt = String::with_capacity(window.len() + 16);
    let mut cursor = 0;
    for m in pattern.find_iter(window) {
        excerpt.push_str(&escape_html(&window[cursor..m.start()]));
        excerpt.push_str("<mark>");
        excerpt.push_str(&escape_html(m.as_str()));
        excerpt.push_str("</mark>");
        cursor = m.end();
    }
    excerpt.push_str(&escape_html(&window[cursor..]));
    excerpt.trim().to_string()
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Flattens a content collection into index records.
pub fn build_index_records(content: &ContentCollection) -> Vec<IndexRecord> {
    let projects = content.projects.iter().map(|p| IndexRecord {
        url: format!("/projects/{}", p.slug),
        title: p.title.clone(),
        record_type: "project".into(),
        content: join_text(&p.description, &p.body),
    });

    let posts = content.blog_posts.iter().map(|p| IndexRecord {
        url: format!("/blog/{}", p.slug),
        title: p.title.clone(),
        record_type: "blog".into(),
        content: join_text(&p.description, &p.body),
    });

    let now = content.now.first().map(|n| IndexRecord {
        url: "/now".into(),
        title: n.title.clone(),
        record_type: "page".into(),
        content: markdown_to_plain_text(&n.body),
    });

    let about = content.about.as_ref().map(|a| IndexRecord {
        url: "/about".into(),
        title: a.title.clone(),
        record_type: "page".into(),
        content: join_text(&a.description, &a.body),
    });

    let uses = content.uses.as_ref().map(|u| IndexRecord {
        url: "/uses".into(),
        title: u.title.clone(),
        record_type: "page".into(),
        content: markdown_to_plain_text(&u.body),
    });

    projects
        .chain(posts)
        .chain(now)
        .chain(about)
        .chain(uses)
        .collect()
}

fn join_text(description: &str, body: &str) -> String {
    let body = markdown_to_plain_text(body);
    if body.is_empty() {
        description.to_string()
    } else {
        format!("{description} {body}")
    }
}
