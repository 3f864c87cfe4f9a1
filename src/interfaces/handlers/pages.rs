use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn get_experiences(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let experiences = state.content_handler.get_experiences().await?;
    Ok(HttpResponse::Ok().json(experiences))
}

/// First current role by order, or 404 when every role has ended.
#[instrument(skip(state))]
pub async fn get_current_experience(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let current = state
        .content_handler
        .get_current_experience()
        .await?
        .ok_or_else(|| AppError::NotFound("No current experience".into()))?;
    Ok(HttpResponse::Ok().json(current))
}

#[instrument(skip(state))]
pub async fn get_skills(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let categories = state.content_handler.get_skill_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[instrument(skip(state))]
pub async fn get_ranked_skills(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let skills = state.content_handler.get_skills_by_proficiency().await?;
    Ok(HttpResponse::Ok().json(skills))
}

#[instrument(skip(state))]
pub async fn get_certifications(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let certifications = state.content_handler.get_certifications().await?;
    Ok(HttpResponse::Ok().json(certifications))
}

#[instrument(skip(state))]
pub async fn get_now(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(state.content_handler.get_now_page().await?))
}

#[instrument(skip(state))]
pub async fn get_about(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(state.content_handler.get_about_page().await?))
}

#[instrument(skip(state))]
pub async fn get_uses(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(state.content_handler.get_uses_page().await?))
}
