use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;

use crate::config::AppConfig;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: BTreeMap<String, ServiceStatus>,
    validation_strategy: String,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    } else {
        "***".to_string()
    }
}

fn check_key(label: &str, key: &str, endpoint: &str) -> ServiceStatus {
    if key.trim().is_empty() {
        return ServiceStatus {
            status: "error".to_string(),
            details: Some(format!("{} key not configured", label)),
        };
    }
    ServiceStatus {
        status: "ok".to_string(),
        details: Some(format!(
            "{} key configured ({}), endpoint {}",
            label,
            mask_key(key),
            endpoint
        )),
    }
}

pub async fn health_check(config: web::Data<AppConfig>) -> impl Responder {
    let credentials = &config.credentials;
    let urls = &config.urls;

    let mut services = BTreeMap::new();
    services.insert(
        "places".to_string(),
        check_key("Places", &credentials.gcp_api_key, &urls.places),
    );
    services.insert(
        "generation".to_string(),
        check_key("Gemini", &credentials.gemini_api_key, &urls.gemini),
    );
    services.insert(
        "weather".to_string(),
        check_key("Weather", &credentials.weather_api_key, &urls.weather),
    );
    services.insert(
        "events".to_string(),
        check_key("Ticketmaster", &credentials.ticketmaster_api_key, &urls.ticketmaster),
    );
    services.insert(
        "interest_search".to_string(),
        check_key("Tavily", &credentials.tavily_api_key, &urls.tavily),
    );

    let status = if services.values().all(|s| s.status == "ok") {
        "ok"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(HealthStatus {
        status: status.to_string(),
        services,
        validation_strategy: config.validation_strategy.to_string(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
