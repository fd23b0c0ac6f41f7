//! Concurrent gathering of weather, events and interest-search context.

use std::{future::Future, sync::Arc, time::Duration};

use crate::models::context::{Event, InterestResult, WeatherSummary};
use crate::services::event_service::{EventProvider, DEFAULT_EVENT_COUNT};
use crate::services::interest_search_service::{interest_query, InterestSearch};
use crate::services::weather_service::WeatherProvider;

const MAX_LISTED_ITEMS: usize = 5;
const NO_EVENTS_TEXT: &str =
    "No specific events found for this date. Searching interesting things to explore...";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripContext {
    pub weather: Option<WeatherSummary>,
    pub events: Vec<Event>,
    pub interests: Vec<InterestResult>,
}

impl TripContext {
    pub fn weather_summary(&self, city: &str) -> String {
        match &self.weather {
            Some(w) => format!(
                "The weather forecast for {} is as follows:\n\
                 - Condition: {}\n\
                 - Temperature: {}°C (feels like {}°C)\n\
                 - Humidity: {}%\n",
                city, w.description, w.temperature, w.feels_like, w.humidity
            ),
            None => String::new(),
        }
    }

    pub fn event_summary(&self) -> String {
        if self.events.is_empty() {
            return format!("{}\n", NO_EVENTS_TEXT);
        }
        let mut summary = String::from("Nearby events on your date:\n");
        for ev in self.events.iter().take(MAX_LISTED_ITEMS) {
            summary.push_str(&format!("- {} at {} on {}\n", ev.name, ev.venue, ev.start_time));
        }
        summary
    }

    pub fn interest_summary(&self) -> String {
        if self.interests.is_empty() {
            return String::new();
        }
        let mut summary = String::from("Here are some interesting places or things to explore:\n");
        for item in self.interests.iter().take(MAX_LISTED_ITEMS) {
            summary.push_str(&format!("- {}: {} ({})\n", item.title, item.snippet, item.url));
        }
        summary
    }
}

pub struct ContextAggregator {
    weather: Arc<dyn WeatherProvider>,
    events: Arc<dyn EventProvider>,
    interests: Arc<dyn InterestSearch>,
    timeout: Duration,
}

impl ContextAggregator {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        events: Arc<dyn EventProvider>,
        interests: Arc<dyn InterestSearch>,
        timeout: Duration,
    ) -> Self {
        Self {
            weather,
            events,
            interests,
            timeout,
        }
    }

    /// Runs the three lookups concurrently. Each one is bounded by the
    /// aggregator timeout and degrades to its empty value on its own.
    pub async fn gather(&self, city: &str, date: &str, preferences: &[String]) -> TripContext {
        let query = interest_query(city, preferences);

        let (weather, events, interests) = tokio::join!(
            self.bounded("weather", self.weather.get_weather(city)),
            self.bounded(
                "events",
                self.events.get_events(city, date, date, DEFAULT_EVENT_COUNT)
            ),
            self.bounded("interests", self.interests.search(&query, city)),
        );

        TripContext {
            weather: weather.flatten(),
            events: events.unwrap_or_default(),
            interests: interests.unwrap_or_default(),
        }
    }

    async fn bounded<T, F>(&self, name: &str, fut: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Context lookup '{}' timed out after {:?}", name, self.timeout);
                None
            }
        }
    }
}
