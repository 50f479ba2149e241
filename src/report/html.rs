use super::types::{ReportSummary, ScenarioReport};
use crate::scenario::Scenario;

/// Render a self-contained HTML page, one table per scenario
pub fn render(report: &ScenarioReport) -> String {
    // Saved reports may carry a stale or hand-edited summary
    let summary = ReportSummary::from_scenarios(&report.scenarios);
    let explicit_rate = if summary.total_steps > 0 {
        ((summary.total_steps - summary.default_outcomes) as f64 / summary.total_steps as f64
            * 100.0) as u32
    } else {
        0
    };

    let scenarios_html = if report.scenarios.is_empty() {
        r#"<div class="empty">No test cases generated</div>"#.to_string()
    } else {
        report
            .scenarios
            .iter()
            .map(scenario_html)
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Test Cases - {source}</title>
    <style>
        :root {{
            --bg-primary: #0a0f1d;
            --bg-secondary: #141b2d;
            --border: #374151;
            --text-primary: #f9fafb;
            --text-secondary: #9ca3af;
            --green: #10b981;
            --purple: #8b5cf6;
        }}

        * {{
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }}

        body {{
            font-family: 'Inter', system-ui, -apple-system, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            line-height: 1.5;
            padding: 3rem 1rem;
        }}

        .container {{
            max-width: 1100px;
            margin: 0 auto;
        }}

        h1 {{
            font-size: 2.25rem;
            font-weight: 800;
            margin-bottom: 2rem;
        }}

        .summary {{
            display: flex;
            gap: 1rem;
            margin-bottom: 2rem;
        }}

        .stat {{
            flex: 1;
            background: var(--bg-secondary);
            border: 1px solid var(--border);
            border-radius: 0.75rem;
            padding: 1.25rem;
        }}

        .stat-value {{
            font-size: 1.75rem;
            font-weight: 700;
        }}

        .stat-label, .meta, .default {{
            color: var(--text-secondary);
            font-size: 0.875rem;
        }}

        .scenario {{
            background: var(--bg-secondary);
            border: 1px solid var(--border);
            border-radius: 0.75rem;
            padding: 1.5rem;
            margin-bottom: 1.5rem;
        }}

        .scenario h3 {{
            margin-bottom: 1rem;
        }}

        table {{
            width: 100%;
            border-collapse: collapse;
        }}

        th, td {{
            text-align: left;
            padding: 0.5rem 0.75rem;
            border-bottom: 1px solid var(--border);
            vertical-align: top;
        }}

        th {{
            color: var(--purple);
            font-size: 0.75rem;
            text-transform: uppercase;
            letter-spacing: 0.1em;
        }}

        .empty {{
            color: var(--text-secondary);
            text-align: center;
            padding: 2rem;
        }}

        .meta {{
            display: flex;
            justify-content: space-between;
            margin-top: 2rem;
        }}
    </style>
</head>
<body>
    <div class="container">
        <h1>Generated Test Cases</h1>

        <div class="summary">
            <div class="stat">
                <div class="stat-value">{total_scenarios}</div>
                <div class="stat-label">Scenarios</div>
            </div>
            <div class="stat">
                <div class="stat-value">{total_steps}</div>
                <div class="stat-label">Steps</div>
            </div>
            <div class="stat">
                <div class="stat-value" style="color: var(--green);">{explicit_rate}%</div>
                <div class="stat-label">Explicit Outcomes</div>
            </div>
        </div>

        {scenarios_html}

        <div class="meta">
            <span>Source: {source}</span>
            <span>Generated: {generated_at}</span>
        </div>
    </div>
</body>
</html>"#,
        source = html_escape(&report.source),
        total_scenarios = summary.total_scenarios,
        total_steps = summary.total_steps,
        explicit_rate = explicit_rate,
        scenarios_html = scenarios_html,
        generated_at = html_escape(&report.generated_at),
    )
}

fn scenario_html(scenario: &Scenario) -> String {
    let rows: String = scenario
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let outcome_class = if step.has_default_outcome() {
                " class=\"default\""
            } else {
                ""
            };
            format!(
                "\n                <tr><td>{}</td><td>{}</td><td{}>{}</td></tr>",
                i + 1,
                html_escape(&step.description),
                outcome_class,
                html_escape(&step.expected_outcome)
            )
        })
        .collect();

    format!(
        r#"
        <div class="scenario">
            <h3>Test Case: {}</h3>
            <table>
                <tr><th>#</th><th>Step</th><th>Expected Outcome</th></tr>{}
            </table>
        </div>"#,
        html_escape(&scenario.name),
        rows
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
