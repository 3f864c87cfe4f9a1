
use std::sync::Arc;

use actix_web::{http::StatusCode, test, App};
use portfolio_content::{
    content::loader::ContentLoader,
    repositories::{static_repo::StaticContentRepo, ContentRepository},
    routes::configure_routes,
    search::IndexRecord,
    AppState,
};
use serde_json::Value;
use test_utils::*;

async fn sample_state() -> actix_web::web::Data<AppState> {
    let dir = sample_content_dir();
    let collection = ContentLoader::new(dir.path()).load().await.unwrap();
    let repo: Arc<dyn ContentRepository> = Arc::new(StaticContentRepo::new(collection));
    let records = vec![IndexRecord {
        url: "/blog/second".into(),
        title: "Second".into(),
        record_type: "blog".into(),
        content: "Postgres tips".into(),
    }];
    test_state(repo, records)
}

macro_rules! get_json {
    ($app:expr, $uri:expr) => {{
        let req = test::TestRequest::get().uri($uri).to_request();
        let resp = test::call_service(&$app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

#[actix_rt::test]
async fn lists_projects_without_private_repository_links() {
    let app = test::init_service(App::new().app_data(sample_state().await).configure(configure_routes)).await;

    let (status, body) = get_json!(app, "/api/v1/projects");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["slug"], "beta");
    assert_eq!(body[1]["slug"], "alpha");
    assert!(body[1]["github"].is_null());
}

#[actix_rt::test]
async fn featured_filter_applies_to_projects_and_posts() {
    let app = test::init_service(App::new().app_data(sample_state().await).configure(configure_routes)).await;

    let (_, projects) = get_json!(app, "/api/v1/projects?featured=true");
    let (_, posts) = get_json!(app, "/api/v1/blog/posts?featured=true");

    assert_eq!(projects.as_array().unwrap().len(), 1);
    assert_eq!(posts.as_array().unwrap().len(), 1);
    assert_eq!(posts[0]["slug"], "second");
}

#[actix_rt::test]
async fn projects_filter_by_repeated_tech_and_sort() {
    let app = test::init_service(App::new().app_data(sample_state().await).configure(configure_routes)).await;

    let (_, postgres) = get_json!(app, "/api/v1/projects?tech=Postgres");
    let (_, either) = get_json!(app, "/api/v1/projects?tech=Postgres&tech=TypeScript");
    let (_, alphabetical) = get_json!(app, "/api/v1/projects?sort=alphabetical");
    let (_, featured_first) = get_json!(app, "/api/v1/projects?sort=featured");
    let (bad_status, _) = get_json!(app, "/api/v1/projects?sort=sideways");

    assert_eq!(postgres.as_array().unwrap().len(), 1);
    assert_eq!(postgres[0]["slug"], "alpha");
    assert_eq!(either.as_array().unwrap().len(), 2);
    assert_eq!(alphabetical[0]["slug"], "alpha");
    assert_eq!(featured_first[0]["slug"], "alpha");
    assert_eq!(bad_status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn unknown_slugs_return_404() {
    let app = test::init_service(App::new().app_data(sample_state().await).configure(configure_routes)).await;

    let (project_status, _) = get_json!(app, "/api/v1/projects/nope");
    let (post_status, body) = get_json!(app, "/api/v1/blog/posts/nope");

    assert_eq!(project_status, StatusCode::NOT_FOUND);
    assert_eq!(post_status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("nope"));
}

#[actix_rt::test]
async fn post_detail_includes_rendered_html() {
    let app = test::init_service(App::new().app_data(sample_state().await).configure(configure_routes)).await;

    let (status, body) = get_json!(app, "/api/v1/blog/posts/first");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "first");
    assert!(body["content_html"].as_str().unwrap().contains("<p>Hello world</p>"));
}

#[actix_rt::test]
async fn tag_filter_and_tag_list() {
    let app = test::init_service(App::new().app_data(sample_state().await).configure(configure_routes)).await;

    let (_, posts) = get_json!(app, "/api/v1/blog/posts?tag=Rust");
    let (_, tags) = get_json!(app, "/api/v1/blog/tags");
    let (blank_status, _) = get_json!(app, "/api/v1/blog/posts?tag=");

    assert_eq!(posts.as_array().unwrap().len(), 2);
    assert_eq!(tags, serde_json::json!(["cooking", "databases", "rust", "web"]));
    assert_eq!(blank_status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn related_posts_respect_the_limit() {
    let app = test::init_service(App::new().app_data(sample_state().await).configure(configure_routes)).await;

    let (_, related) = get_json!(app, "/api/v1/blog/posts/first/related?limit=1");
    let (_, unknown) = get_json!(app, "/api/v1/blog/posts/nope/related");

    assert_eq!(related.as_array().unwrap().len(), 1);
    assert_eq!(related[0]["slug"], "second");
    assert_eq!(unknown, serde_json::json!([]));
}

#[actix_rt::test]
async fn malformed_query_strings_return_json_400() {
    let app = test::init_service(App::new().app_data(sample_state().await).configure(configure_routes)).await;

    let (status, body) = get_json!(app, "/api/v1/blog/posts/first/related?limit=lots");

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid query string"));
}

#[actix_rt::test]
async fn pages_and_missing_singletons() {
    let app = test::init_service(App::new().app_data(sample_state().await).configure(configure_routes)).await;

    let (now_status, now) = get_json!(app, "/api/v1/pages/now");
    let (uses_status, _) = get_json!(app, "/api/v1/pages/uses");
    let (_, current) = get_json!(app, "/api/v1/experience/current");
    let (_, skills) = get_json!(app, "/api/v1/skills");
    let (_, certifications) = get_json!(app, "/api/v1/certifications");

    assert_eq!(now_status, StatusCode::OK);
    assert_eq!(now["last_updated"], "2024-05-01");
    assert_eq!(uses_status, StatusCode::NOT_FOUND);
    assert_eq!(current["company"], "Globex");
    assert_eq!(skills[0]["slug"], "data");
    assert_eq!(certifications.as_array().unwrap().len(), 3);
}

#[actix_rt::test]
async fn search_endpoint_returns_classified_results() {
    let app = test::init_service(App::new().app_data(sample_state().await).configure(configure_routes)).await;

    let (status, body) = get_json!(app, "/api/v1/search?q=postgres");
    let (_, empty) = get_json!(app, "/api/v1/search");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["type"], "blog");
    assert_eq!(body[0]["title"], "Second");
    assert_eq!(empty, serde_json::json!([]));
}

#[actix_rt::test]
async fn sitemap_is_served_as_xml() {
    let app = test::init_service(App::new().app_data(sample_state().await).configure(configure_routes)).await;

    let req = test::TestRequest::get().uri("/sitemap.xml").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let xml = String::from_utf8(body.to_vec()).unwrap();

    assert!(xml.contains("<loc>https://example.com/blog/second</loc>"));
    assert!(xml.contains("<lastmod>2024-04-01</lastmod>"));
    assert!(xml.contains("<loc>https://example.com/projects/alpha</loc>"));
}

#[actix_rt::test]
async fn health_reports_the_content_source() {
    let app = test::init_service(App::new().app_data(sample_state().await).configure(configure_routes)).await;

    let (status, body) = get_json!(app, "/health");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content_source"], "static");
    assert_eq!(body["content_store"], "OK");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
