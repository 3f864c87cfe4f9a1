
use std::time::Duration;

use async_trait::async_trait;
use mockall::{mock, Sequence};
use portfolio_content::{
    entities::{
        blog_post::BlogPost,
        certification::Certification,
        experience::Experience,
        project::Project,
        singletons::{AboutContent, NowContent, UsesContent},
        skill::Skill,
    },
    errors::AppError,
    repositories::{
        cached::{CachedContentRepo, MAX_CACHE_ENTRIES}, BlogPostRepository, ContentRepository, ExperienceRepository,
        PageRepository, ProjectRepository, SkillRepository,
    },
    settings::ContentSource,
};
use test_utils::*;

mock! {
    pub Repo {}

    #[async_trait]
    impl ProjectRepository for Repo {
        async fn get_projects(&self) -> Result<Vec<Project>, AppError>;
        async fn get_featured_projects(&self) -> Result<Vec<Project>, AppError>;
        async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError>;
        async fn get_all_project_tech_stack(&self) -> Result<Vec<String>, AppError>;
    }

    #[async_trait]
    impl ExperienceRepository for Repo {
        async fn get_experiences(&self) -> Result<Vec<Experience>, AppError>;
    }

    #[async_trait]
    impl BlogPostRepository for Repo {
        async fn get_blog_posts(&self) -> Result<Vec<BlogPost>, AppError>;
        async fn get_featured_blog_posts(&self) -> Result<Vec<BlogPost>, AppError>;
        async fn get_blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, AppError>;
        async fn get_all_blog_tags(&self) -> Result<Vec<String>, AppError>;
        async fn get_posts_by_tag(&self, tag: &str) -> Result<Vec<BlogPost>, AppError>;
    }

    #[async_trait]
    impl SkillRepository for Repo {
        async fn get_skills(&self) -> Result<Vec<Skill>, AppError>;
    }

    #[async_trait]
    impl PageRepository for Repo {
        async fn get_now_content(&self) -> Result<Option<NowContent>, AppError>;
        async fn get_about_content(&self) -> Result<Option<AboutContent>, AppError>;
        async fn get_uses_content(&self) -> Result<Option<UsesContent>, AppError>;
        async fn get_certifications(&self) -> Result<Vec<Certification>, AppError>;
    }

    #[async_trait]
    impl ContentRepository for Repo {
        fn source(&self) -> ContentSource;
        async fn check_connection(&self) -> Result<(), AppError>;
    }
}

const TTL: Duration = Duration::from_secs(60);

#[tokio::test(start_paused = true)]
async fn repeated_reads_within_ttl_hit_the_store_once() {
    let mut inner = MockRepo::new();
    inner
        .expect_get_projects()
        .times(1)
        .returning(|| Ok(vec![project("alpha", 1, false)]));
    let repo = CachedContentRepo::new(inner, TTL);

    let first = repo.get_projects().await.unwrap();
    tokio::time::advance(Duration::from_secs(30)).await;
    let second = repo.get_projects().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test(start_paused = true)]
async fn entries_expire_after_ttl() {
    let mut inner = MockRepo::new();
    inner
        .expect_get_blog_posts()
        .times(2)
        .returning(|| Ok(vec![post("a", "2024-01-01", &[])]));
    let repo = CachedContentRepo::new(inner, TTL);

    repo.get_blog_posts().await.unwrap();
    tokio::time::advance(TTL + Duration::from_secs(1)).await;
    repo.get_blog_posts().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn failures_are_not_cached() {
    let mut inner = MockRepo::new();
    let mut seq = Sequence::new();
    inner
        .expect_get_experiences()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Err(AppError::Database("connection refused".into())));
    inner
        .expect_get_experiences()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(vec![experience("Acme", 1, None)]));
    let repo = CachedContentRepo::new(inner, TTL);

    assert!(repo.get_experiences().await.is_err());
    assert_eq!(repo.get_experiences().await.unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn slug_hits_are_cached_per_slug_and_misses_are_not() {
    let mut inner = MockRepo::new();
    inner
        .expect_get_project_by_slug()
        .withf(|slug| slug == "alpha")
        .times(1)
        .returning(|_| Ok(Some(project("alpha", 1, false))));
    inner
        .expect_get_project_by_slug()
        .withf(|slug| slug == "missing")
        .times(3)
        .returning(|_| Ok(None));
    let repo = CachedContentRepo::new(inner, TTL);

    for _ in 0..3 {
        assert!(repo.get_project_by_slug("alpha").await.unwrap().is_some());
        assert!(repo.get_project_by_slug("missing").await.unwrap().is_none());
    }
}

#[tokio::test(start_paused = true)]
async fn tag_queries_share_an_entry_regardless_of_case() {
    let mut inner = MockRepo::new();
    inner
        .expect_get_posts_by_tag()
        .times(1)
        .returning(|_| Ok(vec![post("a", "2024-01-01", &["rust"])]));
    let repo = CachedContentRepo::new(inner, TTL);

    repo.get_posts_by_tag("Rust").await.unwrap();
    let again = repo.get_posts_by_tag("rust").await.unwrap();

    assert_eq!(slugs(&again), vec!["a"]);
}

#[tokio::test(start_paused = true)]
async fn list_queries_do_not_collide() {
    let mut inner = MockRepo::new();
    inner
        .expect_get_blog_posts()
        .times(1)
        .returning(|| Ok(vec![post("a", "2024-01-01", &[]), post("b", "2024-02-01", &[])]));
    inner
        .expect_get_featured_blog_posts()
        .times(1)
        .returning(|| Ok(vec![post("b", "2024-02-01", &[])]));
    let repo = CachedContentRepo::new(inner, TTL);

    assert_eq!(repo.get_blog_posts().await.unwrap().len(), 2);
    assert_eq!(repo.get_featured_blog_posts().await.unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn unknown_slugs_and_empty_tags_leave_no_entries() {
    let mut inner = MockRepo::new();
    inner.expect_get_blog_post_by_slug().returning(|_| Ok(None));
    inner.expect_get_posts_by_tag().returning(|_| Ok(Vec::new()));
    let repo = CachedContentRepo::new(inner, TTL);

    for i in 0..500 {
        repo.get_blog_post_by_slug(&format!("missing-{i}")).await.unwrap();
        repo.get_posts_by_tag(&format!("tag-{i}")).await.unwrap();
    }

    assert_eq!(repo.cached_entries(), 0);
}

#[tokio::test(start_paused = true)]
async fn distinct_keys_stay_bounded_and_expire() {
    let mut inner = MockRepo::new();
    inner
        .expect_get_project_by_slug()
        .returning(|slug| Ok(Some(project(slug, 1, false))));
    let repo = CachedContentRepo::new(inner, TTL);

    for i in 0..3 * MAX_CACHE_ENTRIES {
        repo.get_project_by_slug(&format!("p-{i}")).await.unwrap();
    }
    assert_eq!(repo.cached_entries(), MAX_CACHE_ENTRIES);

    tokio::time::advance(Duration::from_secs(3600)).await;
    repo.get_project_by_slug("fresh").await.unwrap();

    assert_eq!(repo.cached_entries(), 1);
}

#[tokio::test(start_paused = true)]
async fn expired_entries_are_dropped_on_read() {
    let mut inner = MockRepo::new();
    let mut seq = Sequence::new();
    inner
        .expect_get_blog_post_by_slug()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(Some(post("gone", "2024-01-01", &[]))));
    inner
        .expect_get_blog_post_by_slug()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(None));
    let repo = CachedContentRepo::new(inner, TTL);

    repo.get_blog_post_by_slug("gone").await.unwrap();
    assert_eq!(repo.cached_entries(), 1);

    tokio::time::advance(TTL + Duration::from_secs(1)).await;

    assert!(repo.get_blog_post_by_slug("gone").await.unwrap().is_none());
    assert_eq!(repo.cached_entries(), 0);
}

#[tokio::test]
async fn connection_checks_and_source_pass_through() {
    let mut inner = MockRepo::new();
    inner.expect_source().return_const(ContentSource::Database);
    inner.expect_check_connection().times(2).returning(|| Ok(()));
    let repo = CachedContentRepo::new(inner, TTL);

    assert_eq!(repo.source(), ContentSource::Database);
    assert!(repo.check_connection().await.is_ok());
    assert!(repo.check_connection().await.is_ok());
}
