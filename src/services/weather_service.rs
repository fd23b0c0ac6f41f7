use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{PlannerError, Result};
use crate::models::context::WeatherSummary;

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions for `city`, or `None` when they cannot be fetched.
    async fn get_weather(&self, city: &str) -> Option<WeatherSummary>;
}

#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    weather: Vec<OpenWeatherCondition>,
    main: OpenWeatherMain,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Clone)]
pub struct OpenWeatherClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(PlannerError::MissingCredential("WEATHER_API_KEY"));
        }

        let http_client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn fetch(&self, city: &str) -> Result<Option<WeatherSummary>> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;

        if !response.status().is_success() {
            log::warn!("Weather lookup for {} returned {}", city, response.status());
            return Ok(None);
        }

        let data: OpenWeatherResponse = response.json().await?;
        let condition = data
            .weather
            .first()
            .ok_or_else(|| PlannerError::response("weather response had no conditions"))?;

        Ok(Some(WeatherSummary {
            description: capitalize(&condition.description),
            temperature: data.main.temp,
            feels_like: data.main.feels_like,
            humidity: data.main.humidity,
        }))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn get_weather(&self, city: &str) -> Option<WeatherSummary> {
        if city.trim().is_empty() {
            return None;
        }
        match self.fetch(city).await {
            Ok(summary) => summary,
            Err(e) => {
                log::warn!("[Weather] Error fetching weather for {}: {}", city, e);
                None
            }
        }
    }
}
