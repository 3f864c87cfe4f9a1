use actix_web::web;

use crate::handlers::blog_posts;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/blog")
            .service(
                web::resource("/posts")
                    .route(web::get().to(blog_posts::get_blog_posts))
            )
            .service(
                web::resource("/tags")
                    .route(web::get().to(blog_posts::get_blog_tags))
            )
            .service(
                web::resource("/posts/{slug}")
                    .route(web::get().to(blog_posts::get_blog_post))
            )
            .service(
                web::resource("/posts/{slug}/related")
                    .route(web::get().to(blog_posts::get_related_posts))
            )
    );
}
