use std::path::PathBuf;

use anyhow::{Context, Result};
use portfolio_content::{
    content::loader::ContentLoader, search::build_index_records, settings::AppConfig,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Writes the static search artifact. An optional first argument overrides
/// the configured output path.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        error!("Building search index failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = AppConfig::new().context("loading configuration")?;
    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.search_index_path.clone());

    let content = ContentLoader::new(&config.content_dir)
        .load()
        .await
        .context("loading content")?;

    let records = build_index_records(&content);
    let json = serde_json::to_string(&records).context("serialising index")?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    tokio::fs::write(&output, json)
        .await
        .with_context(|| format!("writing {}", output.display()))?;

    info!("Indexed {} documents into {}", records.len(), output.display());
    Ok(())
}
