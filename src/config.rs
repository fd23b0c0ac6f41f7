//! Process configuration.
//!
//! Every credential is required. They are checked once, before any service
//! client is built, so a missing key stops the process at startup instead of
//! surfacing on the first request that needs it.

use std::{env, str::FromStr, time::Duration};

use crate::error::{PlannerError, Result};
use crate::services::place_validation::{PreFilterFailurePolicy, ValidationStrategy};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_CONTEXT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOOKUP_CONCURRENCY: usize = 4;

pub const PLACES_BASE_URL: &str = "https://maps.googleapis.com";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const WEATHER_BASE_URL: &str = "http://api.openweathermap.org";
pub const TICKETMASTER_BASE_URL: &str = "https://app.ticketmaster.com";
pub const TAVILY_BASE_URL: &str = "https://api.tavily.com";

#[derive(Debug, Clone)]
pub struct Credentials {
    pub gcp_api_key: String,
    pub gemini_api_key: String,
    pub weather_api_key: String,
    pub ticketmaster_api_key: String,
    pub tavily_api_key: String,
}

#[derive(Debug, Clone)]
pub struct ServiceUrls {
    pub places: String,
    pub gemini: String,
    pub weather: String,
    pub ticketmaster: String,
    pub tavily: String,
}

impl Default for ServiceUrls {
    fn default() -> Self {
        Self {
            places: PLACES_BASE_URL.to_string(),
            gemini: GEMINI_BASE_URL.to_string(),
            weather: WEATHER_BASE_URL.to_string(),
            ticketmaster: TICKETMASTER_BASE_URL.to_string(),
            tavily: TAVILY_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub credentials: Credentials,
    pub urls: ServiceUrls,
    pub gemini_model: String,
    pub validation_strategy: ValidationStrategy,
    pub prefilter_failure_policy: PreFilterFailurePolicy,
    pub context_timeout: Duration,
    pub lookup_concurrency: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_source(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_source<F>(source: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| {
            source(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let credentials = Credentials {
            gcp_api_key: required(&lookup, "GCP_API_KEY")?,
            gemini_api_key: required(&lookup, "GEMINI_API_KEY")?,
            weather_api_key: required(&lookup, "WEATHER_API_KEY")?,
            ticketmaster_api_key: required(&lookup, "TICKETMASTER_API_KEY")?,
            tavily_api_key: required(&lookup, "TAVILY_API_KEY")?,
        };

        let defaults = ServiceUrls::default();
        let urls = ServiceUrls {
            places: lookup("PLACES_BASE_URL").unwrap_or(defaults.places),
            gemini: lookup("GEMINI_BASE_URL").unwrap_or(defaults.gemini),
            weather: lookup("WEATHER_BASE_URL").unwrap_or(defaults.weather),
            ticketmaster: lookup("TICKETMASTER_BASE_URL").unwrap_or(defaults.ticketmaster),
            tavily: lookup("TAVILY_BASE_URL").unwrap_or(defaults.tavily),
        };

        let lookup_concurrency: usize =
            parsed(&lookup, "LOOKUP_CONCURRENCY")?.unwrap_or(DEFAULT_LOOKUP_CONCURRENCY);
        if lookup_concurrency == 0 {
            return Err(PlannerError::Config {
                message: "LOOKUP_CONCURRENCY must be at least 1".to_string(),
            });
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| HOST.to_string()),
            port: parsed(&lookup, "PORT")?.unwrap_or(PORT),
            credentials,
            urls,
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            validation_strategy: parsed(&lookup, "PLACE_VALIDATION_STRATEGY")?.unwrap_or_default(),
            prefilter_failure_policy: parsed(&lookup, "PREFILTER_FAILURE_POLICY")?
                .unwrap_or_default(),
            context_timeout: Duration::from_secs(
                parsed(&lookup, "CONTEXT_TIMEOUT_SECS")?.unwrap_or(DEFAULT_CONTEXT_TIMEOUT_SECS),
            ),
            lookup_concurrency,
        })
    }
}

fn required<L>(lookup: &L, name: &'static str) -> Result<String>
where
    L: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or(PlannerError::MissingCredential(name))
}

fn parsed<L, T>(lookup: &L, name: &str) -> Result<Option<T>>
where
    L: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.parse::<T>().map(Some).map_err(|e| PlannerError::Config {
            message: format!("invalid value for {}: {} ({})", name, raw, e),
        }),
        None => Ok(None),
    }
}
