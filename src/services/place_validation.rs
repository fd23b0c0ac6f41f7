//! Place validation strategies.
//!
//! Two strategies exist and are deliberately kept apart:
//!
//! - [`DirectLookupValidator`] confirms every candidate with a Places text
//!   search for `"{candidate}, {city}"`.
//! - [`HybridPrefilterValidator`] asks the language model whether each
//!   candidate is a real point of interest in the city and accepts on the
//!   model's word alone. The Places API is never consulted, so this is the
//!   weaker of the two guarantees.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::{collections::HashSet, fmt, str::FromStr, sync::Arc};

use crate::models::place::ValidationOutcome;
use crate::services::generation_service::TextGenerator;
use crate::services::place_extraction::extract_candidates;
use crate::services::places_service::{lookup_query, PlacesLookup};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationStrategy {
    #[default]
    Direct,
    Hybrid,
}

impl ValidationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStrategy::Direct => "direct",
            ValidationStrategy::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for ValidationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Ok(ValidationStrategy::Direct),
            "hybrid" => Ok(ValidationStrategy::Hybrid),
            other => Err(format!("unknown validation strategy '{}'", other)),
        }
    }
}

/// What the hybrid pre-filter does when the model call fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PreFilterFailurePolicy {
    /// Fail open: every candidate handed to the filter is accepted.
    #[default]
    AcceptAll,
    /// Fail closed: nothing is accepted.
    RejectAll,
}

impl FromStr for PreFilterFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "accept_all" => Ok(PreFilterFailurePolicy::AcceptAll),
            "reject_all" => Ok(PreFilterFailurePolicy::RejectAll),
            other => Err(format!("unknown pre-filter failure policy '{}'", other)),
        }
    }
}

#[async_trait]
pub trait Validator: Send + Sync {
    fn strategy(&self) -> ValidationStrategy;

    /// Validates candidates already extracted from a plan.
    async fn validate_candidates(&self, raw: Vec<String>, city: &str) -> ValidationOutcome;

    /// Extracts candidates from `plan_text` and validates them for `city`.
    async fn validate(&self, plan_text: &str, city: &str) -> ValidationOutcome {
        self.validate_candidates(extract_candidates(plan_text), city).await
    }
}

pub struct DirectLookupValidator {
    lookup: Arc<dyn PlacesLookup>,
    concurrency: usize,
}

impl DirectLookupValidator {
    pub fn new(lookup: Arc<dyn PlacesLookup>, concurrency: usize) -> Self {
        Self {
            lookup,
            concurrency: concurrency.max(1),
        }
    }

    /// Keeps the candidates the Places API can locate in `city`, in input order.
    ///
    /// Each lookup is independent: a transport or parse failure drops that one
    /// candidate and is logged.
    pub async fn validate_direct(&self, candidates: &[String], city: &str) -> Vec<String> {
        let checks = candidates
            .iter()
            .map(|candidate| {
                let lookup = self.lookup.clone();
                let query = lookup_query(candidate, city);
                async move {
                    match lookup.text_search(&query).await {
                        Ok(response) => response.is_match().then(|| candidate.clone()),
                        Err(e) => {
                            log::warn!("Error validating '{}': {}", candidate, e);
                            None
                        }
                    }
                }
            })
            .collect::<Vec<_>>();

        stream::iter(checks)
            .buffered(self.concurrency)
            .filter_map(|kept| async move { kept })
            .collect()
            .await
    }
}

#[async_trait]
impl Validator for DirectLookupValidator {
    fn strategy(&self) -> ValidationStrategy {
        ValidationStrategy::Direct
    }

    async fn validate_candidates(&self, raw: Vec<String>, city: &str) -> ValidationOutcome {
        let validated = self.validate_direct(&raw, city).await;
        ValidationOutcome { raw, validated }
    }
}

/// Result of [`HybridPrefilterValidator::hybrid_validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HybridValidation {
    Validated(Vec<String>),
    WithRaw {
        validated: Vec<String>,
        raw: Vec<String>,
    },
}

impl HybridValidation {
    pub fn validated(&self) -> &[String] {
        match self {
            HybridValidation::Validated(validated) => validated,
            HybridValidation::WithRaw { validated, .. } => validated,
        }
    }
}

pub fn prefilter_prompt(places: &[String], city: &str) -> String {
    format!(
        "You're a travel assistant. Given the city \"{city}\" and a list of place names, \
         identify which ones are actual real-world places of interest located in that city.\n\n\
         City: {city}\n\
         Places: {places}\n\n\
         Respond with only a comma-separated list of valid place names found in the city.",
        city = city,
        places = places.join(", "),
    )
}

/// Splits the model's comma-separated answer into distinct, trimmed names.
pub fn parse_prefilter_response(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_string()))
        .map(str::to_string)
        .collect()
}

pub struct HybridPrefilterValidator {
    generator: Arc<dyn TextGenerator>,
    failure_policy: PreFilterFailurePolicy,
    concurrency: usize,
}

impl HybridPrefilterValidator {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        failure_policy: PreFilterFailurePolicy,
        concurrency: usize,
    ) -> Self {
        Self {
            generator,
            failure_policy,
            concurrency: concurrency.max(1),
        }
    }

    /// Names from `places` the model considers real in `city`.
    pub async fn prefilter(&self, places: &[String], city: &str) -> Vec<String> {
        if places.is_empty() {
            return Vec::new();
        }

        let prompt = prefilter_prompt(places, city);
        match self.generator.generate(&prompt).await {
            Ok(text) => parse_prefilter_response(&text),
            Err(e) => {
                log::warn!("Place pre-filter failed for {}: {}", city, e);
                match self.failure_policy {
                    PreFilterFailurePolicy::AcceptAll => places.to_vec(),
                    PreFilterFailurePolicy::RejectAll => Vec::new(),
                }
            }
        }
    }

    /// Extracts candidates and pre-filters them one at a time. A candidate is
    /// accepted when the filter returns any name for it.
    pub async fn hybrid_validate(
        &self,
        plan_text: &str,
        city: &str,
        return_all: bool,
    ) -> HybridValidation {
        let raw = extract_candidates(plan_text);
        let validated = self.accept_each(&raw, city).await;

        if return_all {
            HybridValidation::WithRaw { validated, raw }
        } else {
            HybridValidation::Validated(validated)
        }
    }

    async fn accept_each(&self, raw: &[String], city: &str) -> Vec<String> {
        let checks = raw
            .iter()
            .map(|candidate| async move {
                let accepted = self.prefilter(std::slice::from_ref(candidate), city).await;
                (!accepted.is_empty()).then(|| candidate.clone())
            })
            .collect::<Vec<_>>();

        stream::iter(checks)
            .buffered(self.concurrency)
            .filter_map(|kept| async move { kept })
            .collect()
            .await
    }
}

#[async_trait]
impl Validator for HybridPrefilterValidator {
    fn strategy(&self) -> ValidationStrategy {
        ValidationStrategy::Hybrid
    }

    async fn validate_candidates(&self, raw: Vec<String>, city: &str) -> ValidationOutcome {
        let validated = self.accept_each(&raw, city).await;
        ValidationOutcome { raw, validated }
    }
}

pub fn build_validator(
    strategy: ValidationStrategy,
    lookup: Arc<dyn PlacesLookup>,
    generator: Arc<dyn TextGenerator>,
    failure_policy: PreFilterFailurePolicy,
    concurrency: usize,
) -> Arc<dyn Validator> {
    match strategy {
        ValidationStrategy::Direct => Arc::new(DirectLookupValidator::new(lookup, concurrency)),
        ValidationStrategy::Hybrid => Arc::new(HybridPrefilterValidator::new(
            generator,
            failure_policy,
            concurrency,
        )),
    }
}
