use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    entities::project::{ProjectFilter, ProjectListResponse, ProjectSort},
    errors::AppError,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct ProjectQuery {
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub sort: ProjectSort,
}

/// Every non-blank `tech` value; the key may repeat.
fn tech_params(query_string: &str) -> Vec<String> {
    url::form_urlencoded::parse(query_string.as_bytes())
        .filter(|(key, value)| key == "tech" && !value.trim().is_empty())
        .map(|(_, value)| value.trim().to_string())
        .collect()
}

#[instrument(skip(state, req))]
pub async fn get_projects(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<ProjectQuery>,
) -> Result<impl Responder, AppError> {
    let filter = ProjectFilter {
        tech: tech_params(req.query_string()),
        sort: query.sort,
    };

    let projects = state.content_handler.list_projects(query.featured, &filter).await?;

    let response: Vec<ProjectListResponse> = projects.iter().map(|p| p.to_list_response()).collect();
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(state))]
pub async fn get_project(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.content_handler.get_project_detail(&slug).await?;
    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(state))]
pub async fn get_tech_stack(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let stack = state.content_handler.get_all_project_tech_stack().await?;
    Ok(HttpResponse::Ok().json(stack))
}
