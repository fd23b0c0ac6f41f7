//! Ticketmaster Discovery API client for events happening on the trip date.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{PlannerError, Result};
use crate::models::context::Event;

pub const DEFAULT_EVENT_COUNT: usize = 5;

#[async_trait]
pub trait EventProvider: Send + Sync {
    /// Events in `city` between the two `YYYY-MM-DD` dates, earliest first.
    /// Empty on any failure.
    async fn get_events(
        &self,
        city: &str,
        start_date: &str,
        end_date: &str,
        max_count: usize,
    ) -> Vec<Event>;
}

#[derive(Debug, Deserialize)]
struct DiscoveryResponse {
    #[serde(rename = "_embedded")]
    embedded: Option<EmbeddedEvents>,
}

#[derive(Debug, Deserialize)]
struct EmbeddedEvents {
    #[serde(default)]
    events: Vec<DiscoveryEvent>,
}

#[derive(Debug, Deserialize)]
struct DiscoveryEvent {
    name: String,
    url: Option<String>,
    dates: Option<EventDates>,
    #[serde(rename = "_embedded")]
    embedded: Option<EmbeddedVenues>,
}

#[derive(Debug, Deserialize)]
struct EventDates {
    start: Option<EventStart>,
}

#[derive(Debug, Deserialize)]
struct EventStart {
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddedVenues {
    #[serde(default)]
    venues: Vec<Venue>,
}

#[derive(Debug, Deserialize)]
struct Venue {
    name: Option<String>,
    city: Option<VenueCity>,
}

#[derive(Debug, Deserialize)]
struct VenueCity {
    name: Option<String>,
}

impl DiscoveryEvent {
    fn into_event(self) -> Option<Event> {
        let venue = self.embedded?.venues.into_iter().next()?;
        let start_time = self
            .dates
            .and_then(|d| d.start)
            .and_then(|s| s.date_time)
            .unwrap_or_else(|| "N/A".to_string());

        Some(Event {
            name: self.name,
            url: self.url,
            venue: venue.name?,
            start_time,
            location: venue.city.and_then(|c| c.name).unwrap_or_default(),
        })
    }
}

#[derive(Clone)]
pub struct TicketmasterClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl TicketmasterClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(PlannerError::MissingCredential("TICKETMASTER_API_KEY"));
        }

        let http_client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn fetch(
        &self,
        city: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        max_count: usize,
    ) -> Result<Vec<Event>> {
        let url = format!("{}/discovery/v2/events.json", self.base_url);
        let start = format!("{}T00:00:00Z", start_date.format("%Y-%m-%d"));
        let end = format!("{}T23:59:59Z", end_date.format("%Y-%m-%d"));
        let size = max_count.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("city", city),
                ("startDateTime", start.as_str()),
                ("endDateTime", end.as_str()),
                ("size", size.as_str()),
                ("sort", "date,asc"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let data: DiscoveryResponse = response.json().await?;
        let events = data
            .embedded
            .map(|e| e.events)
            .unwrap_or_default()
            .into_iter()
            .filter_map(DiscoveryEvent::into_event)
            .take(max_count)
            .collect();

        Ok(events)
    }
}

#[async_trait]
impl EventProvider for TicketmasterClient {
    async fn get_events(
        &self,
        city: &str,
        start_date: &str,
        end_date: &str,
        max_count: usize,
    ) -> Vec<Event> {
        let (start, end) = match (
            NaiveDate::parse_from_str(start_date.trim(), "%Y-%m-%d"),
            NaiveDate::parse_from_str(end_date.trim(), "%Y-%m-%d"),
        ) {
            (Ok(start), Ok(end)) => (start, end),
            _ => {
                log::warn!(
                    "[Events] Skipping event search for {}: invalid date range {}..{}",
                    city,
                    start_date,
                    end_date
                );
                return Vec::new();
            }
        };

        if city.trim().is_empty() || max_count == 0 {
            return Vec::new();
        }

        match self.fetch(city, start, end, max_count).await {
            Ok(events) => events,
            Err(e) => {
                log::warn!("[Events] Error fetching events for {}: {}", city, e);
                Vec::new()
            }
        }
    }
}
