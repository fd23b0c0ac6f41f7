//! Free-text web search (Tavily) for things to do that match the traveller's
//! preferences.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{PlannerError, Result};
use crate::models::context::InterestResult;

pub const MAX_INTEREST_RESULTS: usize = 5;

#[async_trait]
pub trait InterestSearch: Send + Sync {
    /// At most [`MAX_INTEREST_RESULTS`] hits for `query`. Empty when `city` is
    /// blank or the search fails.
    async fn search(&self, query: &str, city: &str) -> Vec<InterestResult>;
}

pub fn interest_query(city: &str, preferences: &[String]) -> String {
    if preferences.is_empty() {
        format!("Interesting places to visit in {}", city)
    } else {
        format!("Things to do in {} related to {}", city, preferences.join(", "))
    }
}

#[derive(Debug, Serialize)]
struct TavilySearchRequest<'a> {
    query: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct TavilySearchResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    url: String,
}

#[derive(Clone)]
pub struct TavilyClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl TavilyClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(PlannerError::MissingCredential("TAVILY_API_KEY"));
        }

        let http_client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn fetch(&self, query: &str) -> Result<Vec<InterestResult>> {
        let url = format!("{}/search", self.base_url);
        let request = TavilySearchRequest {
            query,
            max_results: MAX_INTEREST_RESULTS,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let data: TavilySearchResponse = response.json().await?;
        Ok(data
            .results
            .into_iter()
            .take(MAX_INTEREST_RESULTS)
            .map(|r| InterestResult {
                title: r.title,
                snippet: r.content.trim().to_string(),
                url: r.url,
            })
            .collect())
    }
}

#[async_trait]
impl InterestSearch for TavilyClient {
    async fn search(&self, query: &str, city: &str) -> Vec<InterestResult> {
        if city.trim().is_empty() {
            return Vec::new();
        }
        match self.fetch(query).await {
            Ok(results) => results,
            Err(e) => {
                log::warn!("[InterestSearch] Search failed for '{}': {}", query, e);
                Vec::new()
            }
        }
    }
}
