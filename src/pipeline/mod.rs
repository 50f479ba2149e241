//! File processing: media in, scenario reports out.

use crate::extract;
use crate::report::ScenarioReport;
use crate::scenario::{build_scenarios_with, EventSink, ScenarioEvent};
use crate::utils::config::Config;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Outcome of processing one input file
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<ScenarioReport>,
}

/// Sink that keeps builder messages for the report and mirrors them to the log
#[derive(Debug, Default)]
pub struct TraceCollector {
    pub messages: Vec<String>,
}

impl EventSink for TraceCollector {
    fn emit(&mut self, event: ScenarioEvent) {
        let message = event.to_string();
        log::debug!("{}", message);
        self.messages.push(message);
    }
}

/// Run the scenario builder over already-extracted lines
pub fn build_report(source: &str, lines: &[String], mut logs: Vec<String>) -> ScenarioReport {
    let mut trace = TraceCollector::default();
    let scenarios = build_scenarios_with(lines, &mut trace);
    logs.append(&mut trace.messages);
    ScenarioReport::new(source, scenarios, logs)
}

/// Extract text from one media file and build its report
pub async fn process_file(path: &Path, config: &Config) -> Result<ScenarioReport> {
    let mut logs = vec![format!("Received file: {}", path.display())];

    let lines = extract::extract_lines(path, config)
        .await
        .with_context(|| format!("Error processing file: {}", path.display()))?;
    logs.push(format!("Extracted {} text lines", lines.len()));

    Ok(build_report(&path.display().to_string(), &lines, logs))
}

/// Build a report from a plain text file holding one recognised line per row
pub fn process_lines_file(path: &Path) -> Result<ScenarioReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read lines file: {}", path.display()))?;
    let lines: Vec<String> = content.lines().map(|l| l.to_string()).collect();
    let logs = vec![format!("Read {} lines from {}", lines.len(), path.display())];
    Ok(build_report(&path.display().to_string(), &lines, logs))
}

/// Media files under `path`: the file itself, or PDFs and recordings found recursively
pub fn collect_files(path: &Path, config: &Config) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map_or(false, |ext| {
                    ext.eq_ignore_ascii_case("pdf") || config.is_video_extension(ext)
                })
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

/// Process a file or directory; one outcome per media file, in path order
pub async fn process_paths(path: &Path, config: &Config, parallel: bool) -> Vec<FileOutcome> {
    let files = collect_files(path, config);
    if files.is_empty() {
        log::warn!("No media files found under {}", path.display());
        return Vec::new();
    }

    if parallel && files.len() > 1 {
        log::info!("Processing {} files in parallel", files.len());

        let handles: Vec<_> = files
            .into_iter()
            .map(|file| {
                let config = config.clone();
                let task_path = file.clone();
                let handle =
                    tokio::spawn(async move { process_file(&task_path, &config).await });
                (file, handle)
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for (file, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(anyhow::anyhow!("Task for {} aborted: {}", file.display(), e)),
            };
            outcomes.push(FileOutcome { path: file, result });
        }
        outcomes
    } else {
        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            let result = process_file(&file, config).await;
            outcomes.push(FileOutcome { path: file, result });
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_report_collects_trace() {
        let report = build_report(
            "guide.pdf",
            &lines(&["Login Page", "1", "Click Login button"]),
            vec!["Received file: guide.pdf".to_string()],
        );

        assert_eq!(report.scenarios.len(), 1);
        assert_eq!(report.summary.total_steps, 1);
        assert_eq!(report.logs[0], "Received file: guide.pdf");
        assert!(report.logs.iter().any(|l| l == "Found step 1: Click Login button"));
    }

    #[test]
    fn test_build_report_without_scenario() {
        let report = build_report("blank.mp4", &lines(&["Made with Scribe", "42"]), Vec::new());
        assert!(report.is_empty());
        assert!(report
            .logs
            .iter()
            .any(|l| l.starts_with("No scenario name found")));
    }

    #[test]
    fn test_process_lines_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.txt");
        std::fs::write(
            &path,
            "Made with Scribe\n\nHome Page\nNavigate to Settings\nExpected Outcome: Settings open\n",
        )
        .unwrap();

        let report = process_lines_file(&path).unwrap();
        assert_eq!(report.scenarios[0].name, "Home Page");
        assert_eq!(report.scenarios[0].steps[0].expected_outcome, "Settings open");
    }

    #[test]
    fn test_collect_files_filters_media() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("nested")).unwrap();
        for name in ["b.pdf", "a.MP4", "notes.txt", "nested/c.webm"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let files = collect_files(dir.path(), &Config::default());
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["a.MP4", "b.pdf", "nested/c.webm"]);
    }

    #[test]
    fn test_collect_single_file() {
        let files = collect_files(Path::new("guide.pdf"), &Config::default());
        assert_eq!(files, vec![PathBuf::from("guide.pdf")]);
    }

    #[tokio::test]
    async fn test_process_paths_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"x").unwrap();
        assert!(process_paths(dir.path(), &Config::default(), true).await.is_empty());
    }

    #[tokio::test]
    async fn test_process_paths_reports_missing_file() {
        let outcomes =
            process_paths(Path::new("/no/such/guide.pdf"), &Config::default(), false).await;
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].result.is_err());
    }
}
