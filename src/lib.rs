use std::sync::Arc;

use tracing::info;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod graceful_shutdown;
pub mod focus_trap;
pub mod search;

pub use domain::{collection, entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{content, db, utils};

use content::loader::ContentLoader;
use db::postgres::{create_pool, PoolSettings};
use errors::AppError;
use repositories::{
    cached::CachedContentRepo, sqlx_repo::SqlxContentRepo, static_repo::StaticContentRepo,
    ContentRepository,
};
use search::{FileIndexLoader, SearchService};
use settings::{AppConfig, ContentSource};
use use_cases::content::ContentHandler;
use utils::markdown::MarkdownRenderer;

pub struct AppState {
    pub content_handler: ContentHandler,
    pub search_service: Arc<SearchService>,
    pub site_url: String,
}

impl AppState {
    pub fn new(config: &AppConfig, repo: Arc<dyn ContentRepository>) -> Self {
        let content_handler = ContentHandler::new(repo, Arc::new(MarkdownRenderer));
        let search_service = Arc::new(SearchService::new(Arc::new(FileIndexLoader::new(
            config.search_index_path.clone(),
        ))));

        AppState {
            content_handler,
            search_service,
            site_url: config.site_url.clone(),
        }
    }
}

/// Builds the content repository for the configured source. The choice is
/// made once; nothing downstream knows which source is active.
pub async fn build_repository(config: &AppConfig) -> Result<Arc<dyn ContentRepository>, AppError> {
    match config.content_source {
        ContentSource::Static => {
            let collection = ContentLoader::new(&config.content_dir).load().await?;
            info!("Serving content from {}", config.content_dir.display());
            Ok(Arc::new(StaticContentRepo::new(collection)))
        }
        ContentSource::Database => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                AppError::InternalError("No database URL configured for database content".into())
            })?;
            let pool = create_pool(url, &PoolSettings::from(config)).await?;
            let repo = SqlxContentRepo::new(pool);

            match config.cache_ttl() {
                Some(ttl) => {
                    info!("Serving content from database, cached for {:?}", ttl);
                    Ok(Arc::new(CachedContentRepo::new(repo, ttl)))
                }
                None => {
                    info!("Serving content from database, uncached");
                    Ok(Arc::new(repo))
                }
            }
        }
    }
}
