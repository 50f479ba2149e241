use std::path::PathBuf;
use thiserror::Error;

/// Failures of the text-extraction collaborators
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Could not find '{name}'. Checked:\n{checked}")]
    ToolNotFound { name: String, checked: String },

    #[error("{tool} failed: {message}")]
    ToolFailed { tool: String, message: String },

    #[error("No text could be extracted from the {kind}: {}", .path.display())]
    NoText { kind: &'static str, path: PathBuf },

    #[error("PDF text layer unreadable: {0}")]
    Pdf(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    pub fn tool_failed(tool: &str, stderr: &[u8]) -> Self {
        ExtractError::ToolFailed {
            tool: tool.to_string(),
            message: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }
}
