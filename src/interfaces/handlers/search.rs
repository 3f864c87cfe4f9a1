use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{errors::AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Search never fails; an unavailable index yields an empty list.
#[instrument(skip(state))]
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<impl Responder, AppError> {
    let results = state.search_service.search(&query.q).await;
    Ok(HttpResponse::Ok().json(results))
}
