use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use itinerary_planner::{build_planner, config::AppConfig, configure_routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;
    let planner = build_planner(&config).map_err(|e| {
        log::error!("Failed to build service clients: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    log::info!(
        "Place validation strategy: {}, context timeout: {:?}",
        planner.validation_strategy(),
        config.context_timeout
    );

    let host = config.host.clone();
    let port = config.port;
    let planner = web::Data::new(planner);
    let config = web::Data::new(config);

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(planner.clone())
            .app_data(config.clone())
            .configure(configure_routes)
    })
    .bind((host, port))?
    .run()
    .await
}
