use super::types::ScenarioReport;
use anyhow::Result;

/// Render the scenarios as a YAML document
pub fn render(report: &ScenarioReport) -> Result<String> {
    Ok(serde_yaml::to_string(&report.scenarios)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{Scenario, Step};

    #[test]
    fn test_render_yaml() {
        let report = ScenarioReport::new(
            "guide.pdf",
            vec![Scenario::new("Settings", vec![Step::new("Navigate to Settings")])],
            Vec::new(),
        );
        let yaml = render(&report).unwrap();
        assert!(yaml.contains("name: Settings"));
        assert!(yaml.contains("description: Navigate to Settings"));

        let back: Vec<crate::scenario::Scenario> = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, report.scenarios);
    }
}
