use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};

/// Scenarios extracted from one media file, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub source: String,
    pub generated_at: String,
    #[serde(alias = "test_cases")]
    pub scenarios: Vec<Scenario>,
    pub summary: ReportSummary,
    #[serde(default)]
    pub logs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_scenarios: usize,
    pub total_steps: usize,
    /// Steps that never received an explicit expected outcome
    pub default_outcomes: usize,
}

impl ReportSummary {
    pub fn from_scenarios(scenarios: &[Scenario]) -> Self {
        let steps = scenarios.iter().flat_map(|s| s.steps.iter());
        Self {
            total_scenarios: scenarios.len(),
            total_steps: steps.clone().count(),
            default_outcomes: steps.filter(|s| s.has_default_outcome()).count(),
        }
    }
}

impl ScenarioReport {
    pub fn new(source: &str, scenarios: Vec<Scenario>, logs: Vec<String>) -> Self {
        Self {
            source: source.to_string(),
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            summary: ReportSummary::from_scenarios(&scenarios),
            scenarios,
            logs,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
