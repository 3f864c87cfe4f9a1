//! Requires a disposable Postgres database in `TEST_DATABASE_URL`.
//! Run with `cargo test -- --ignored --test-threads=1`; every test truncates
//! the content tables.


use portfolio_content::{
    content::loader::ContentLoader,
    db::postgres::{create_pool, run_migrations, PoolSettings},
    repositories::{
        sqlx_repo::{SqlxContentRepo, SqlxSeedStore},
        static_repo::StaticContentRepo,
        BlogPostRepository, ContentRepository, PageRepository, ProjectRepository, SkillRepository,
    },
    settings::AppConfig,
    use_cases::seed::ContentSeeder,
};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use test_utils::*;

async fn fresh_pool() -> PgPool {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let pool = create_pool(&url, &PoolSettings::from(&AppConfig::default()))
        .await
        .expect("Failed to create test DB pool");

    run_migrations(&pool).await.expect("Failed to run migrations");

    sqlx::query(
        "TRUNCATE TABLE projects, experiences, blog_posts, skills, now_content, about_content, \
         uses_content, certifications",
    )
    .execute(&pool)
    .await
    .expect("Failed to truncate tables");

    pool
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[actix_rt::test]
#[ignore]
async fn seeding_is_idempotent() {
    let pool = fresh_pool().await;
    let dir = sample_content_dir();
    let content = ContentLoader::new(dir.path()).load().await.unwrap();
    let seeder = ContentSeeder::new(SqlxSeedStore::new(pool.clone()));

    seeder.seed(&content).await.unwrap();
    seeder.seed(&content).await.unwrap();

    assert_eq!(count(&pool, "projects").await, 2);
    assert_eq!(count(&pool, "blog_posts").await, 3);
    assert_eq!(count(&pool, "experiences").await, 2);
    assert_eq!(count(&pool, "now_content").await, 1);
    assert_eq!(count(&pool, "certifications").await, 3);
}

#[actix_rt::test]
#[ignore]
async fn database_source_matches_static_ordering() {
    let pool = fresh_pool().await;
    let dir = sample_content_dir();
    let content = ContentLoader::new(dir.path()).load().await.unwrap();
    ContentSeeder::new(SqlxSeedStore::new(pool.clone()))
        .seed(&content)
        .await
        .unwrap();
    let repo = SqlxContentRepo::new(pool);

    let projects = repo.get_projects().await.unwrap();
    let posts = repo.get_blog_posts().await.unwrap();
    let tags = repo.get_all_blog_tags().await.unwrap();
    let skills = repo.get_skills().await.unwrap();

    assert_eq!(projects.iter().map(|p| p.slug.as_str()).collect::<Vec<_>>(), vec!["beta", "alpha"]);
    assert_eq!(slugs(&posts), vec!["second", "third", "first"]);
    assert_eq!(tags, vec!["cooking", "databases", "rust", "web"]);
    assert_eq!(skills[0].name, "SQL");
    assert!(repo.get_project_by_slug("nope").await.unwrap().is_none());
    assert!(repo.get_about_content().await.unwrap().is_some());
    assert!(repo.check_connection().await.is_ok());
}

async fn seed_dir(pool: &PgPool, dir: &std::path::Path) -> portfolio_content::collection::ContentCollection {
    let content = ContentLoader::new(dir).load().await.unwrap();
    ContentSeeder::new(SqlxSeedStore::new(pool.clone()))
        .seed(&content)
        .await
        .unwrap();
    content
}

#[actix_rt::test]
#[ignore]
async fn posts_added_later_keep_file_order_on_date_ties() {
    let pool = fresh_pool().await;
    let dir = sample_content_dir();
    write_file(
        dir.path(),
        "blog/tie-b.md",
        "---\ntitle: Bravo\ndescription: Tied\nslug: bravo\npublishedDate: 2030-01-01\n---\nB\n",
    );
    seed_dir(&pool, dir.path()).await;

    write_file(
        dir.path(),
        "blog/tie-a.md",
        "---\ntitle: Alpha\ndescription: Tied\nslug: alpha\npublishedDate: 2030-01-01\n---\nA\n",
    );
    let content = seed_dir(&pool, dir.path()).await;

    let static_posts = StaticContentRepo::new(content).get_blog_posts().await.unwrap();
    let db_posts = SqlxContentRepo::new(pool).get_blog_posts().await.unwrap();

    assert_eq!(slugs(&static_posts)[..2], ["alpha", "bravo"]);
    assert_eq!(slugs(&db_posts), slugs(&static_posts));
}

#[actix_rt::test]
#[ignore]
async fn long_project_titles_seed_like_they_load() {
    let pool = fresh_pool().await;
    let dir = sample_content_dir();
    let title = "T".repeat(150);
    write_file(
        dir.path(),
        "projects/long.md",
        &format!("---\ntitle: {title}\ndescription: {}\nslug: long\norder: 3\n---\nLong\n", "D".repeat(300)),
    );

    seed_dir(&pool, dir.path()).await;
    let stored = SqlxContentRepo::new(pool).get_project_by_slug("long").await.unwrap().unwrap();

    assert_eq!(stored.title, title);
}

#[actix_rt::test]
#[ignore]
async fn reseeding_advances_updated_at() {
    let pool = fresh_pool().await;
    let dir = sample_content_dir();
    let updated_at = |pool: PgPool| async move {
        sqlx::query_scalar::<_, DateTime<Utc>>("SELECT updated_at FROM blog_posts WHERE slug = 'first'")
            .fetch_one(&pool)
            .await
            .unwrap()
    };

    seed_dir(&pool, dir.path()).await;
    let first = updated_at(pool.clone()).await;
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    seed_dir(&pool, dir.path()).await;
    let second = updated_at(pool.clone()).await;

    assert!(second > first, "updated_at did not move: {first} -> {second}");
    assert_eq!(count(&pool, "blog_posts").await, 3);
}
