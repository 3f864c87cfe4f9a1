use actix_web::web;

use crate::handlers::{home::home, system};

mod blog;
mod json_error;
mod pages;
mod projects;
mod search;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(system::health_check)
        .service(system::sitemap);

    cfg.service(
        web::scope("/api/v1")
            .configure(projects::config_routes)
            .configure(blog::config_routes)
            .configure(pages::config_routes)
            .configure(search::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
