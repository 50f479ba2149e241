use crate::scenario::Scenario;

const SCENARIO_SEPARATOR: &str = "\n\n---\n\n";

/// Render scenarios as numbered manual test cases
pub fn format_test_cases(scenarios: &[Scenario]) -> String {
    if scenarios.is_empty() {
        return "No test cases generated".to_string();
    }

    scenarios
        .iter()
        .map(format_test_case)
        .collect::<Vec<_>>()
        .join(SCENARIO_SEPARATOR)
}

fn format_test_case(scenario: &Scenario) -> String {
    let steps = scenario
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            format!(
                "{}. {}\n   Expected Outcome: {}",
                i + 1,
                step.description,
                step.expected_outcome
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("Test Case: {}\n\n{}", scenario.name, steps)
}
