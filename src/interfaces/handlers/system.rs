use actix_web::{get, http::header::ContentType, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use humantime::format_duration;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::{
    sync::{atomic::{AtomicI64, Ordering}, RwLock},
    time::Duration,
};

use crate::{
    errors::AppError,
    use_cases::sitemap::render_sitemap_xml,
    AppState,
};

#[derive(Serialize, Clone, Default)]
struct HealthCheckResponse {
    status: String,
    uptime: String,
    timestamp: String,
    start_at: String,
    content_source: String,
    content_store: String,
    search_index: String,
    version: String,
}

/// Process start, forced by `main` before the server binds.
pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

static LAST_CHECK: AtomicI64 = AtomicI64::new(0);
static CACHED_STATUS: Lazy<RwLock<HealthCheckResponse>> = Lazy::new(||
    RwLock::new(HealthCheckResponse::default())
);

async fn build_health_response(state: &web::Data<AppState>) -> HealthCheckResponse {
    let now_utc = Utc::now();
    let uptime_duration = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime_duration.num_seconds().max(0) as u64));

    let store_status = match state.content_handler.check_connection().await {
        Ok(_) => "OK",
        Err(_) => "Unavailable",
    };

    let search_status = if state.search_service.is_available().await {
        "OK"
    } else {
        "Unavailable"
    };

    HealthCheckResponse {
        status: if store_status == "OK" { "healthy" } else { "degraded" }.to_string(),
        uptime: human_uptime.to_string(),
        timestamp: now_utc.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        content_source: state.content_handler.source().to_string(),
        content_store: store_status.to_string(),
        search_index: search_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now = Utc::now().timestamp();
    let last = LAST_CHECK.load(Ordering::Relaxed);

    if now - last > 5 {
        let response = build_health_response(&state).await;

        if let Ok(mut cache) = CACHED_STATUS.write() {
            *cache = response.clone();
            LAST_CHECK.store(now, Ordering::Relaxed);
        }

        HttpResponse::Ok().json(response)
    } else {
        match CACHED_STATUS.read() {
            Ok(response) => HttpResponse::Ok().json(response.clone()),
            Err(e) => {
                tracing::warn!("HealthCheck cache lock poisoned: {}", e);
                let response = build_health_response(&state).await;
                HttpResponse::Ok().json(response)
            }
        }
    }
}

#[get("/sitemap.xml")]
pub async fn sitemap(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let today = Utc::now().date_naive();
    let entries = state.content_handler.sitemap(&state.site_url, today).await?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::xml())
        .body(render_sitemap_xml(&entries)))
}
