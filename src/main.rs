use actix_cors::Cors;
use actix_web::{http::Method, middleware::NormalizePath, web, App, HttpServer};
use portfolio_content::{
    build_repository,
    graceful_shutdown::shutdown_signal,
    handlers::system::START_TIME,
    routes::configure_routes,
    settings::AppConfig,
    AppState,
};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    once_cell::sync::Lazy::force(&START_TIME);

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        },
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let repo = match build_repository(&config).await {
        Ok(repo) => repo,
        Err(e) => {
            tracing::error!("Failed to initialise content source: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = web::Data::new(AppState::new(&config, repo));

    let server_addr = format!("{}:{}", config.host, config.port);
    let cors_origins = config.cors_origins();

    tracing::info!(
        "🚀 Starting {} v{} on {} ({} content)",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr,
        config.content_source
    );

    let server = HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| {
                if origin == "*" {
                    cors.allow_any_origin()
                } else {
                    cors.allowed_origin(origin)
                }
            })
            .allowed_methods([Method::GET, Method::HEAD, Method::OPTIONS])
            .max_age(3600);

        App::new()
            .app_data(app_state.clone())
            .wrap(TracingLogger::default())
            .wrap(cors)
            .wrap(NormalizePath::trim())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
