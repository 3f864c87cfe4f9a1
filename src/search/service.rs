use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::{
    errors::SearchError,
    search::index::{HitMeta, IndexHit, SearchIndex, StaticSearchIndex},
};

pub const MAX_SEARCH_RESULTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Blog,
    Project,
    Page,
}

impl ResultType {
    /// Declared type wins; otherwise the URL prefix decides.
    pub fn classify(meta: &HitMeta, url: &str) -> Self {
        match meta.hit_type.as_deref() {
            Some("blog") => return ResultType::Blog,
            Some("project") => return ResultType::Project,
            Some("page") => return ResultType::Page,
            _ => {}
        }

        if url.starts_with("/blog/") {
            ResultType::Blog
        } else if url.starts_with("/projects/") {
            ResultType::Project
        } else {
            ResultType::Page
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResultType::Blog => "Blog",
            ResultType::Project => "Project",
            ResultType::Page => "Page",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub excerpt: String,
    #[serde(rename = "type")]
    pub result_type: ResultType,
}

impl From<IndexHit> for SearchResult {
    fn from(hit: IndexHit) -> Self {
        let result_type = ResultType::classify(&hit.meta, &hit.url);
        SearchResult {
            title: hit
                .meta
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "Untitled".to_string()),
            url: hit.url,
            excerpt: hit.excerpt,
            result_type,
        }
    }
}

#[async_trait]
pub trait IndexLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn SearchIndex>, SearchError>;
}

/// Loads the JSON artifact from disk.
pub struct FileIndexLoader {
    pub path: PathBuf,
}

impl FileIndexLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileIndexLoader { path: path.into() }
    }
}

#[async_trait]
impl IndexLoader for FileIndexLoader {
    async fn load(&self) -> Result<Arc<dyn SearchIndex>, SearchError> {
        let index = StaticSearchIndex::load(&self.path).await?;
        debug!(records = index.records().len(), path = %self.path.display(), "search index loaded");
        Ok(Arc::new(index))
    }
}

/// Wraps a search index that is loaded at most once per process.
///
/// A failed load is remembered: every later search reports zero results
/// instead of retrying.
pub struct SearchService {
    loader: Option<Arc<dyn IndexLoader>>,
    index: OnceCell<Option<Arc<dyn SearchIndex>>>,
}

impl SearchService {
    pub fn new(loader: Arc<dyn IndexLoader>) -> Self {
        SearchService {
            loader: Some(loader),
            index: OnceCell::new(),
        }
    }

    /// Service over an index that is already in memory.
    pub fn with_index(index: Arc<dyn SearchIndex>) -> Self {
        SearchService {
            loader: None,
            index: OnceCell::new_with(Some(Some(index))),
        }
    }

    async fn index(&self) -> Option<&Arc<dyn SearchIndex>> {
        self.index
            .get_or_init(|| async {
                let loader = self.loader.as_ref()?;
                match loader.load().await {
                    Ok(index) => Some(index),
                    Err(e) => {
                        warn!("Search index not available, search will return no results: {}", e);
                        None
                    }
                }
            })
            .await
            .as_ref()
    }

    pub async fn is_available(&self) -> bool {
        self.index().await.is_some()
    }

    /// At most [`MAX_SEARCH_RESULTS`] classified results. Never fails.
    pub async fn search(&self, query: &str) -> Vec<SearchResult> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let Some(index) = self.index().await else {
            return Vec::new();
        };

        match index.search(query).await {
            Ok(hits) => hits
                .into_iter()
                .take(MAX_SEARCH_RESULTS)
                .map(SearchResult::from)
                .collect(),
            Err(e) => {
                warn!(query, "Search error: {}", e);
                Vec::new()
            }
        }
    }
}
