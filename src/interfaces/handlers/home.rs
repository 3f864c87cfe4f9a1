use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Portfolio content API",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ["/api/v1/projects", "/api/v1/blog/posts", "/api/v1/pages/now", "/api/v1/search", "/sitemap.xml"]
    }))
}
