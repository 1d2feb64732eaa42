use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use skill_match::config::Settings;
use skill_match::core::Matcher;
use skill_match::routes::{self, AppState};
use skill_match::services::JobLoader;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Initialize logging; RUST_LOG overrides the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    info!("Starting skill matching service...");

    let loader = Arc::new(JobLoader::new(settings.data.jobs_path.clone()));
    if !loader.path().exists() {
        error!(
            "Job data file {} does not exist yet; /api/match-skills will fail until it does",
            loader.path().display()
        );
    }

    let matching_config = settings.matching_config();
    let matcher = Matcher::new(matching_config);

    info!("Matcher initialized with config: {:?}", matching_config);

    let app_state = AppState { loader, matcher };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
