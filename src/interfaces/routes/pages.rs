use actix_web::web;

use crate::handlers::pages;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/experience")
            .service(web::resource("").route(web::get().to(pages::get_experiences)))
            .service(web::resource("/current").route(web::get().to(pages::get_current_experience)))
    )
    .service(web::resource("/skills").route(web::get().to(pages::get_skills)))
    .service(web::resource("/skills/ranked").route(web::get().to(pages::get_ranked_skills)))
    .service(web::resource("/certifications").route(web::get().to(pages::get_certifications)))
    .service(
        web::scope("/pages")
            .service(web::resource("/now").route(web::get().to(pages::get_now)))
            .service(web::resource("/about").route(web::get().to(pages::get_about)))
            .service(web::resource("/uses").route(web::get().to(pages::get_uses)))
    );
}
