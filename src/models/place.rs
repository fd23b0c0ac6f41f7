use serde::{Deserialize, Serialize};

/// Raw vs. validated candidate counts for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub raw_count: usize,
    pub validated_count: usize,
}

impl ValidationReport {
    pub fn accuracy_percent(&self) -> f64 {
        if self.raw_count == 0 {
            return 0.0;
        }
        self.validated_count as f64 / self.raw_count as f64 * 100.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub raw: Vec<String>,
    pub validated: Vec<String>,
}

impl ValidationOutcome {
    pub fn report(&self) -> ValidationReport {
        ValidationReport {
            raw_count: self.raw.len(),
            validated_count: self.validated.len(),
        }
    }
}
