pub mod html;
pub mod json;
pub mod text;
pub mod types;
pub mod yaml;

pub use types::{ReportSummary, ScenarioReport};

use anyhow::{Context, Result};
use std::path::Path;

/// Output formats for generated test cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// Numbered manual test cases
    #[default]
    Text,
    Json,
    Yaml,
    Html,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Yaml => "yaml",
            ReportFormat::Html => "html",
        }
    }
}

/// Render a report in the requested format
pub fn render(report: &ScenarioReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(text::format_test_cases(&report.scenarios)),
        ReportFormat::Json => json::render(report),
        ReportFormat::Yaml => yaml::render(report),
        ReportFormat::Html => Ok(html::render(report)),
    }
}

/// Write rendered content to `output`, or stdout when absent
pub fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Report saved to: {}", path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

/// Re-render a saved JSON report in another format
pub fn generate_report(report_path: &Path, format: ReportFormat, output: Option<&Path>) -> Result<()> {
    let content = std::fs::read_to_string(report_path)
        .with_context(|| format!("Failed to read report: {}", report_path.display()))?;
    let report = json::parse(&content)
        .with_context(|| format!("Invalid report file: {}", report_path.display()))?;

    let rendered = render(&report, format)?;
    write_output(&rendered, output)
}
