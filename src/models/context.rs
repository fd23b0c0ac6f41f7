use serde::{Deserialize, Serialize};

/// Current conditions for a city, already converted to display units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub description: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub url: Option<String>,
    pub venue: String,
    pub start_time: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestResult {
    pub title: String,
    pub snippet: String,
    pub url: String,
}
