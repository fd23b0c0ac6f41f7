mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::{sample_context, sample_event, sample_interest, StubEvents, StubInterests, StubWeather};
use itinerary_planner::services::context_service::ContextAggregator;

#[actix_rt::test]
async fn test_gather_collects_all_three_sources() {
    let aggregator = sample_context(None, Duration::from_secs(2));

    let context = aggregator.gather("Paris", "2025-06-01", &[]).await;

    assert!(context.weather.is_some());
    assert_eq!(context.events, vec![sample_event()]);
    assert_eq!(context.interests, vec![sample_interest()]);
}

#[actix_rt::test]
async fn test_hanging_weather_does_not_block_other_sources() {
    let aggregator = sample_context(Some(Duration::from_secs(30)), Duration::from_millis(100));

    let started = Instant::now();
    let context = aggregator.gather("Paris", "2025-06-01", &[]).await;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(context.weather.is_none());
    assert_eq!(context.events, vec![sample_event()]);
    assert_eq!(context.interests, vec![sample_interest()]);
}

#[actix_rt::test]
async fn test_failed_weather_degrades_to_empty_block() {
    let aggregator = ContextAggregator::new(
        Arc::new(StubWeather {
            summary: None,
            delay: None,
        }),
        Arc::new(StubEvents { events: Vec::new() }),
        Arc::new(StubInterests {
            results: vec![sample_interest()],
        }),
        Duration::from_secs(1),
    );

    let context = aggregator.gather("Paris", "2025-06-01", &[]).await;

    assert!(context.weather_summary("Paris").is_empty());
    assert!(context.event_summary().starts_with("No specific events found"));
    assert!(context.interest_summary().contains("Hidden courtyards"));
}

#[actix_rt::test]
async fn test_slow_source_within_timeout_is_awaited() {
    let slow = Duration::from_millis(300);
    let aggregator = ContextAggregator::new(
        Arc::new(StubWeather {
            summary: None,
            delay: Some(slow),
        }),
        Arc::new(StubEvents { events: Vec::new() }),
        Arc::new(StubInterests { results: Vec::new() }),
        Duration::from_secs(5),
    );

    let started = Instant::now();
    aggregator.gather("Paris", "2025-06-01", &[]).await;
    let elapsed = started.elapsed();

    assert!(elapsed >= slow);
    assert!(elapsed < Duration::from_secs(5));
}
