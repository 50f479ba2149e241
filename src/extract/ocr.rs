//! Tesseract OCR engine
//!
//! Runs the `tesseract` CLI in TSV mode and joins the word rows it reports
//! back into lines.

use super::ExtractError;
use crate::utils::binary_resolver;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::process::Command;

/// OCR engine backed by a resolved tesseract binary
#[derive(Debug, Clone)]
pub struct OcrEngine {
    binary: PathBuf,
    language: String,
}

impl OcrEngine {
    /// Locate tesseract and verify it runs
    pub async fn new(language: &str) -> Result<Self, ExtractError> {
        let binary = binary_resolver::find_binary("tesseract")?;

        let output = Command::new(&binary)
            .arg("--version")
            .output()
            .await
            .map_err(|e| ExtractError::ToolFailed {
                tool: "tesseract".to_string(),
                message: format!("Tesseract OCR is not properly configured: {}", e),
            })?;
        if !output.status.success() {
            return Err(ExtractError::tool_failed("tesseract", &output.stderr));
        }

        let version = String::from_utf8_lossy(&output.stdout);
        log::info!(
            "OCR backend: {} ({})",
            binary.display(),
            version.lines().next().unwrap_or("unknown version")
        );

        Ok(Self {
            binary,
            language: language.to_string(),
        })
    }

    /// Recognised line texts of one image, in Tesseract reading order
    pub async fn recognize_lines(&self, image_path: &Path) -> Result<Vec<String>, ExtractError> {
        let start = Instant::now();

        let output = Command::new(&self.binary)
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg("3")
            .arg("tsv")
            .output()
            .await?;

        if !output.status.success() {
            return Err(ExtractError::tool_failed("tesseract", &output.stderr));
        }

        let tsv = String::from_utf8_lossy(&output.stdout);
        let lines = parse_tesseract_tsv(&tsv);

        log::debug!(
            "OCR of {} completed in {}ms ({} lines)",
            image_path.display(),
            start.elapsed().as_millis(),
            lines.len()
        );

        Ok(lines)
    }
}

/// Join TSV word rows into line texts.
///
/// Lines are keyed by (page, block, paragraph, line) and come out in key
/// order, so column layouts keep their reading order.
pub fn parse_tesseract_tsv(tsv: &str) -> Vec<String> {
    let mut line_groups: BTreeMap<(u32, u32, u32, u32), Vec<&str>> = BTreeMap::new();

    // Header row first
    for row in tsv.lines().skip(1) {
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < 12 {
            continue;
        }

        let text = cols[11].trim();
        if text.is_empty() {
            continue;
        }

        let key = (
            cols[1].parse().unwrap_or(0),
            cols[2].parse().unwrap_or(0),
            cols[3].parse().unwrap_or(0),
            cols[4].parse().unwrap_or(0),
        );
        line_groups.entry(key).or_default().push(text);
    }

    line_groups.into_values().map(|words| words.join(" ")).collect()
}
