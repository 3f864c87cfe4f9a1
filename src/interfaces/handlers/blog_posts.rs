use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    entities::blog_post::{BlogPost, BlogPostListResponse},
    errors::AppError,
    use_cases::related::DEFAULT_RELATED_LIMIT,
    AppState,
};

const MAX_RELATED_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct BlogPostQuery {
    #[serde(default)]
    pub featured: bool,
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RelatedQuery {
    pub limit: Option<usize>,
}

fn list_response(posts: &[BlogPost]) -> Vec<BlogPostListResponse> {
    posts.iter().map(BlogPost::to_list_response).collect()
}

#[instrument(skip(state))]
pub async fn get_blog_posts(
    state: web::Data<AppState>,
    query: web::Query<BlogPostQuery>,
) -> Result<impl Responder, AppError> {
    let handler = &state.content_handler;

    let posts = match (&query.tag, query.featured) {
        (Some(tag), _) if tag.trim().is_empty() => {
            return Err(AppError::InvalidInput("tag must not be empty".into()));
        }
        (Some(tag), _) => handler.get_posts_by_tag(tag).await?,
        (None, true) => handler.get_featured_blog_posts().await?,
        (None, false) => handler.get_blog_posts().await?,
    };

    Ok(HttpResponse::Ok().json(list_response(&posts)))
}

#[instrument(skip(state))]
pub async fn get_blog_post(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let post = state.content_handler.get_blog_post_detail(&slug).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[instrument(skip(state))]
pub async fn get_related_posts(
    slug: web::Path<String>,
    state: web::Data<AppState>,
    query: web::Query<RelatedQuery>,
) -> Result<impl Responder, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_RELATED_LIMIT).min(MAX_RELATED_LIMIT);

    let posts = state.content_handler.get_related_posts(&slug, limit).await?;
    Ok(HttpResponse::Ok().json(list_response(&posts)))
}

#[instrument(skip(state))]
pub async fn get_blog_tags(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let tags = state.content_handler.get_all_blog_tags().await?;
    Ok(HttpResponse::Ok().json(tags))
}
