use super::types::ScenarioReport;
use anyhow::Result;

/// Render the full report as pretty JSON
pub fn render(report: &ScenarioReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Load a report previously written by [`render`]
pub fn parse(content: &str) -> Result<ScenarioReport> {
    Ok(serde_json::from_str(content)?)
}
