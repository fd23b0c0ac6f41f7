#![allow(dead_code)]

use actix_web::{web, App};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use itinerary_planner::config::AppConfig;
use itinerary_planner::configure_routes;
use itinerary_planner::error::{PlannerError, Result};
use itinerary_planner::models::context::{Event, InterestResult, WeatherSummary};
use itinerary_planner::services::context_service::ContextAggregator;
use itinerary_planner::services::event_service::EventProvider;
use itinerary_planner::services::generation_service::TextGenerator;
use itinerary_planner::services::interest_search_service::InterestSearch;
use itinerary_planner::services::itinerary_planner_service::ItineraryPlanner;
use itinerary_planner::services::place_validation::{DirectLookupValidator, Validator};
use itinerary_planner::services::places_service::{PlaceSearchResponse, PlacesLookup};
use itinerary_planner::services::weather_service::WeatherProvider;

pub const SAMPLE_PLAN: &str = "## Morning\n\
    9:00 - Visit the Eiffel Tower for skyline views.\n\
    11:00 - Head to Fake Place for coffee.\n\
    ## Afternoon\n\
    Lunch is simple today.\n\
    14:00 - Explore the Louvre Museum.\n";

/// Places stub: queries in `matches` succeed, queries in `failures` error.
#[derive(Default)]
pub struct StubLookup {
    matches: HashSet<String>,
    failures: HashSet<String>,
    pub calls: AtomicUsize,
}

impl StubLookup {
    pub fn matching(queries: &[&str]) -> Self {
        Self {
            matches: queries.iter().map(|q| q.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, queries: &[&str]) -> Self {
        self.failures = queries.iter().map(|q| q.to_string()).collect();
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlacesLookup for StubLookup {
    async fn text_search(&self, query: &str) -> Result<PlaceSearchResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failures.contains(query) {
            return Err(PlannerError::response(format!("lookup failed for {}", query)));
        }
        let body = if self.matches.contains(query) {
            r#"{"status": "OK", "results": [{"name": "match"}]}"#
        } else {
            r#"{"status": "ZERO_RESULTS", "results": []}"#
        };
        Ok(serde_json::from_str(body).expect("stub body"))
    }
}

type Responder = Box<dyn Fn(&str) -> Result<String> + Send + Sync>;

/// Generator stub driven by a closure over the prompt. Records every prompt.
pub struct StubGenerator {
    responder: Responder,
    pub prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&str) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn fixed(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_| Ok(text.clone()))
    }

    pub fn failing() -> Self {
        Self::new(|_| Err(PlannerError::generation("model unavailable")))
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.responder)(prompt)
    }
}

pub struct StubWeather {
    pub summary: Option<WeatherSummary>,
    pub delay: Option<Duration>,
}

#[async_trait]
impl WeatherProvider for StubWeather {
    async fn get_weather(&self, _city: &str) -> Option<WeatherSummary> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.summary.clone()
    }
}

pub struct StubEvents {
    pub events: Vec<Event>,
}

#[async_trait]
impl EventProvider for StubEvents {
    async fn get_events(&self, _city: &str, _start: &str, _end: &str, max_count: usize) -> Vec<Event> {
        self.events.iter().take(max_count).cloned().collect()
    }
}

pub struct StubInterests {
    pub results: Vec<InterestResult>,
}

#[async_trait]
impl InterestSearch for StubInterests {
    async fn search(&self, _query: &str, city: &str) -> Vec<InterestResult> {
        if city.trim().is_empty() {
            return Vec::new();
        }
        self.results.clone()
    }
}

pub fn sample_weather() -> WeatherSummary {
    WeatherSummary {
        description: "Scattered clouds".to_string(),
        temperature: 18.0,
        feels_like: 17.0,
        humidity: 60.0,
    }
}

pub fn sample_event() -> Event {
    Event {
        name: "Jazz Night".to_string(),
        url: Some("https://tickets.example/jazz".to_string()),
        venue: "New Morning".to_string(),
        start_time: "2025-06-01T20:00:00Z".to_string(),
        location: "Paris".to_string(),
    }
}

pub fn sample_interest() -> InterestResult {
    InterestResult {
        title: "Hidden courtyards".to_string(),
        snippet: "Quiet corners of the Marais".to_string(),
        url: "https://example.com/marais".to_string(),
    }
}

pub fn sample_context(weather_delay: Option<Duration>, timeout: Duration) -> ContextAggregator {
    ContextAggregator::new(
        Arc::new(StubWeather {
            summary: Some(sample_weather()),
            delay: weather_delay,
        }),
        Arc::new(StubEvents {
            events: vec![sample_event()],
        }),
        Arc::new(StubInterests {
            results: vec![sample_interest()],
        }),
        timeout,
    )
}

pub fn test_config() -> AppConfig {
    AppConfig::from_source(|name| match name {
        "GCP_API_KEY" => Some("gcp-test-key-0001".to_string()),
        "GEMINI_API_KEY" => Some("gemini-test-key".to_string()),
        "WEATHER_API_KEY" => Some("weather-test-key".to_string()),
        "TICKETMASTER_API_KEY" => Some("tm-test-key".to_string()),
        "TAVILY_API_KEY" => Some("tavily-test-key".to_string()),
        _ => None,
    })
    .expect("test config")
}

pub struct TestApp {
    pub planner: web::Data<ItineraryPlanner>,
    pub config: web::Data<AppConfig>,
}

impl TestApp {
    /// Planner with stub context, direct validation against `lookup`, and
    /// `generator` producing the plan.
    pub fn new(generator: Arc<StubGenerator>, lookup: Arc<StubLookup>) -> Self {
        let validator: Arc<dyn Validator> = Arc::new(DirectLookupValidator::new(lookup, 4));
        let planner = ItineraryPlanner::new(
            generator,
            sample_context(None, Duration::from_secs(2)),
            validator,
        );
        Self {
            planner: web::Data::new(planner),
            config: web::Data::new(test_config()),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.planner.clone())
            .app_data(self.config.clone())
            .configure(configure_routes)
    }
}
