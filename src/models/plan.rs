use serde::{Deserialize, Serialize};

use crate::models::place::ValidationReport;

const DEFAULT_BUDGET: &str = "medium";
const DEFAULT_PACE: &str = "medium";
pub const DEFAULT_PREFERENCE_TEXT: &str = "general sightseeing";

/// Body of `POST /generate-plan`, as sent by either the JSON client or the form.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct PlanSubmission {
    pub city: Option<String>,
    pub date: Option<String>,
    pub budget: Option<String>,
    #[serde(default)]
    pub preferences: Option<Vec<String>>,
    pub pace: Option<String>,
}

impl PlanSubmission {
    /// Parses an urlencoded form body. `preferences` may repeat.
    pub fn from_form(body: &[u8]) -> Self {
        let mut submission = PlanSubmission::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            let value = value.into_owned();
            match &*key {
                "city" => submission.city = Some(value),
                "date" => submission.date = Some(value),
                "budget" => submission.budget = Some(value),
                "pace" => submission.pace = Some(value),
                "preferences" | "preferences[]" => submission
                    .preferences
                    .get_or_insert_with(Vec::new)
                    .push(value),
                _ => {}
            }
        }
        submission
    }

    pub fn into_request(self) -> Result<PlanRequest, String> {
        let city = non_blank(self.city).ok_or_else(|| "city is required".to_string())?;

        Ok(PlanRequest {
            city,
            date: non_blank(self.date).unwrap_or_default(),
            budget: non_blank(self.budget).unwrap_or_else(|| DEFAULT_BUDGET.to_string()),
            preferences: self
                .preferences
                .unwrap_or_default()
                .into_iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
            pace: non_blank(self.pace).unwrap_or_else(|| DEFAULT_PACE.to_string()),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    pub city: String,
    pub date: String,
    pub budget: String,
    pub preferences: Vec<String>,
    pub pace: String,
}

impl PlanRequest {
    pub fn preference_text(&self) -> String {
        if self.preferences.is_empty() {
            DEFAULT_PREFERENCE_TEXT.to_string()
        } else {
            self.preferences.join(", ")
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub plan_markdown: String,
    pub plan_html: String,
    pub places: Vec<String>,
    pub report: ValidationReport,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub plan: String,
    pub places: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_collects_repeated_preferences() {
        let body = b"city=Paris&date=2025-06-01&preferences=art&preferences=food&pace=relaxed";
        let request = PlanSubmission::from_form(body).into_request().unwrap();
        assert_eq!(request.city, "Paris");
        assert_eq!(request.preferences, vec!["art", "food"]);
        assert_eq!(request.pace, "relaxed");
        assert_eq!(request.budget, "medium");
    }

    #[test]
    fn test_form_decodes_plus_and_percent() {
        let body = b"city=New+York&preferences=street%20food";
        let request = PlanSubmission::from_form(body).into_request().unwrap();
        assert_eq!(request.city, "New York");
        assert_eq!(request.preference_text(), "street food");
    }

    #[test]
    fn test_missing_city_is_rejected() {
        let submission = PlanSubmission {
            city: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(submission.into_request().unwrap_err(), "city is required");
    }

    #[test]
    fn test_empty_preferences_default_to_general_sightseeing() {
        let submission: PlanSubmission =
            serde_json::from_str(r#"{"city": "Rome", "date": "2025-05-10"}"#).unwrap();
        let request = submission.into_request().unwrap();
        assert!(request.preferences.is_empty());
        assert_eq!(request.preference_text(), "general sightseeing");
    }

    #[test]
    fn test_null_preferences_mean_none() {
        let submission: PlanSubmission =
            serde_json::from_str(r#"{"city": "Rome", "preferences": null}"#).unwrap();
        let request = submission.into_request().unwrap();
        assert!(request.preferences.is_empty());
        assert_eq!(request.preference_text(), "general sightseeing");
    }
}
