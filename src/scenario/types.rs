use serde::{Deserialize, Serialize};

/// Outcome given to every step until an explicit "Expected Outcome:" line overrides it
pub const DEFAULT_EXPECTED_OUTCOME: &str = "Action completed successfully";

/// One action of a scenario together with what should happen after it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub description: String,
    pub expected_outcome: String,
}

impl Step {
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            expected_outcome: DEFAULT_EXPECTED_OUTCOME.to_string(),
        }
    }

    pub fn has_default_outcome(&self) -> bool {
        self.expected_outcome == DEFAULT_EXPECTED_OUTCOME
    }
}

/// Structured test scenario recovered from one text-line sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn new(name: &str, steps: Vec<Step>) -> Self {
        Self {
            name: name.to_string(),
            steps,
        }
    }
}
