use actix_web::web;
use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::AppConfig;
use error::Result;
use services::context_service::ContextAggregator;
use services::event_service::TicketmasterClient;
use services::generation_service::GeminiClient;
use services::interest_search_service::TavilyClient;
use services::itinerary_planner_service::ItineraryPlanner;
use services::place_validation::build_validator;
use services::places_service::GooglePlacesClient;
use services::weather_service::OpenWeatherClient;

/// Wires every service client from `config` into a planner.
pub fn build_planner(config: &AppConfig) -> Result<ItineraryPlanner> {
    let credentials = &config.credentials;
    let urls = &config.urls;

    let generator = Arc::new(GeminiClient::new(
        urls.gemini.as_str(),
        config.gemini_model.as_str(),
        credentials.gemini_api_key.as_str(),
    )?);
    let lookup = Arc::new(GooglePlacesClient::new(
        urls.places.as_str(),
        credentials.gcp_api_key.as_str(),
    )?);

    let context = ContextAggregator::new(
        Arc::new(OpenWeatherClient::new(
            urls.weather.as_str(),
            credentials.weather_api_key.as_str(),
        )?),
        Arc::new(TicketmasterClient::new(
            urls.ticketmaster.as_str(),
            credentials.ticketmaster_api_key.as_str(),
        )?),
        Arc::new(TavilyClient::new(
            urls.tavily.as_str(),
            credentials.tavily_api_key.as_str(),
        )?),
        config.context_timeout,
    );

    let validator = build_validator(
        config.validation_strategy,
        lookup,
        generator.clone(),
        config.prefilter_failure_policy,
        config.lookup_concurrency,
    );

    Ok(ItineraryPlanner::new(generator, context, validator))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(routes::plan::index))
        .route("/generate-plan", web::post().to(routes::plan::generate_plan))
        .route("/health", web::get().to(routes::health::health_check));
}
