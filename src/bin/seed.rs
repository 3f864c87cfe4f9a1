use anyhow::{Context, Result};
use portfolio_content::{
    content::loader::ContentLoader,
    db::postgres::{create_pool, run_migrations, PoolSettings},
    repositories::sqlx_repo::SqlxSeedStore,
    settings::AppConfig,
    use_cases::seed::ContentSeeder,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Copies the markdown content tree into Postgres. Safe to re-run.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        error!("Seeding failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = AppConfig::new().context("loading configuration")?;
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_POOLER_URL, DATABASE_PUBLIC_URL or DATABASE_URL must be set")?;

    info!("🌱 Starting database seed from {}", config.content_dir.display());

    let pool = create_pool(database_url, &PoolSettings::from(&config))
        .await
        .context("connecting to database")?;
    run_migrations(&pool).await.context("applying migrations")?;

    let content = ContentLoader::new(&config.content_dir)
        .load()
        .await
        .context("loading content")?;

    let seeder = ContentSeeder::new(SqlxSeedStore::new(pool.clone()));
    let report = seeder.seed(&content).await.context("writing content")?;

    info!("✅ Seeding complete\n{}", report);
    pool.close().await;
    Ok(())
}
