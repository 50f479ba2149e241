use crate::extract::ExtractError;
use std::path::PathBuf;

/// External tools the extractors shell out to
pub const TOOLS: [&str; 3] = ["tesseract", "ffmpeg", "pdftoppm"];

/// Find a tool binary: install directory first, then next to the executable, then PATH
pub fn find_binary(name: &str) -> Result<PathBuf, ExtractError> {
    let file_name = executable_name(name);
    let mut checked_paths = Vec::new();

    // 1. ~/.lumi-scribe/bin
    if let Some(install_dir) = super::config::install_dir() {
        let path = install_dir.join("bin").join(&file_name);
        checked_paths.push(format!("Install Dir: {:?}", path));
        if path.is_file() {
            return Ok(path);
        }
    }

    // 2. Alongside the running binary
    if let Ok(exe_path) = std::env::current_exe() {
        let path = exe_path.with_file_name(&file_name);
        checked_paths.push(format!("Beside EXE: {:?}", path));
        if path.is_file() {
            return Ok(path);
        }
    }

    // 3. System PATH
    match which::which(name) {
        Ok(path) => Ok(path),
        Err(_) => {
            checked_paths.push("System PATH".to_string());
            Err(ExtractError::ToolNotFound {
                name: name.to_string(),
                checked: checked_paths.join("\n"),
            })
        }
    }
}

fn executable_name(name: &str) -> String {
    if cfg!(windows) && !name.ends_with(".exe") {
        format!("{}.exe", name)
    } else {
        name.to_string()
    }
}

/// Resolve every known tool, for diagnostics
pub fn resolve_all() -> Vec<(&'static str, Result<PathBuf, ExtractError>)> {
    TOOLS.iter().map(|name| (*name, find_binary(name))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_lists_checked_paths() {
        let err = find_binary("lumi-scribe-no-such-tool").unwrap_err();
        match err {
            ExtractError::ToolNotFound { name, checked } => {
                assert_eq!(name, "lumi-scribe-no-such-tool");
                assert!(checked.contains("System PATH"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_all_covers_tools() {
        let names: Vec<&str> = resolve_all().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, TOOLS.to_vec());
    }
}
