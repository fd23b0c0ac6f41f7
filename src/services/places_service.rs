//! Google Places Text Search client.
//!
//! Used to confirm that a candidate name resolves to a real venue in the
//! requested city. A lookup counts as a match only when the API reports
//! `status == "OK"` and returns at least one result.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{PlannerError, Result};

const TEXT_SEARCH_PATH: &str = "/maps/api/place/textsearch/json";
const STATUS_OK: &str = "OK";

#[derive(Debug, Deserialize)]
pub struct PlaceSearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
}

impl PlaceSearchResponse {
    pub fn is_match(&self) -> bool {
        self.status == STATUS_OK && !self.results.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub struct PlaceResult {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub place_id: Option<String>,
}

/// Builds the text-search query for a candidate, qualified by city.
pub fn lookup_query(candidate: &str, city: &str) -> String {
    format!("{}, {}", candidate, city)
}

#[async_trait]
pub trait PlacesLookup: Send + Sync {
    async fn text_search(&self, query: &str) -> Result<PlaceSearchResponse>;
}

#[derive(Clone)]
pub struct GooglePlacesClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl GooglePlacesClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(PlannerError::MissingCredential("GCP_API_KEY"));
        }

        let http_client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl PlacesLookup for GooglePlacesClient {
    async fn text_search(&self, query: &str) -> Result<PlaceSearchResponse> {
        let url = format!("{}{}", self.base_url, TEXT_SEARCH_PATH);

        let response = self
            .http_client
            .get(&url)
            .query(&[("query", query), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| {
            PlannerError::response(format!(
                "Failed to parse Places response: {}. Response: {}",
                e, response_text
            ))
        })
    }
}
