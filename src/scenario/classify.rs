//! Line classification for Scribe-style instruction text.
//!
//! Every recognised line falls into exactly one [`LineKind`]. Rules are
//! checked in a fixed order, so a line that both contains "Click" and starts
//! with "Expected Outcome:" is an action.

/// Watermark the capture tool stamps on exported pages
pub const WATERMARK_PREFIX: &str = "Made with Scribe";

/// Looser prefix used when rejecting title candidates
pub const TITLE_EXCLUDED_PREFIX: &str = "Made with";

/// Prefix of a line stating the outcome of the preceding action
pub const OUTCOME_PREFIX: &str = "Expected Outcome:";

/// Case-sensitive keywords marking a UI interaction
pub const ACTION_KEYWORDS: [&str; 2] = ["Click", "Navigate"];

/// Classification of a single trimmed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Boilerplate,
    Blank,
    /// Digits-only line, the step counter shown by the capture UI
    StepMarker(Option<u64>),
    Action(&'a str),
    /// Text after the outcome prefix, trimmed
    Outcome(&'a str),
    Other,
}

impl<'a> LineKind<'a> {
    /// Classify a raw line; surrounding whitespace is ignored
    pub fn of(raw: &'a str) -> Self {
        let line = raw.trim();

        if line.starts_with(WATERMARK_PREFIX) {
            return LineKind::Boilerplate;
        }
        if line.is_empty() {
            return LineKind::Blank;
        }
        if is_numeric(line) {
            return LineKind::StepMarker(line.parse().ok());
        }
        if is_action(line) {
            return LineKind::Action(line);
        }
        if let Some(rest) = line.strip_prefix(OUTCOME_PREFIX) {
            return LineKind::Outcome(rest.trim());
        }
        LineKind::Other
    }

    /// Short label used in trace output
    pub fn label(&self) -> &'static str {
        match self {
            LineKind::Boilerplate => "boilerplate",
            LineKind::Blank => "blank",
            LineKind::StepMarker(_) => "step-marker",
            LineKind::Action(_) => "action",
            LineKind::Outcome(_) => "outcome",
            LineKind::Other => "other",
        }
    }
}

/// True when the trimmed line consists of ASCII digits only
pub fn is_numeric(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c.is_ascii_digit())
}

fn is_action(line: &str) -> bool {
    ACTION_KEYWORDS.iter().any(|keyword| line.contains(keyword))
}

/// Whether a line may serve as the scenario title
pub fn is_title_candidate(raw: &str) -> bool {
    let line = raw.trim();
    !line.is_empty() && !line.starts_with(TITLE_EXCLUDED_PREFIX) && !is_numeric(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_basic_kinds() {
        assert_eq!(LineKind::of("Made with Scribe"), LineKind::Boilerplate);
        assert_eq!(LineKind::of("  Made with Scribe - scribehow.com"), LineKind::Boilerplate);
        assert_eq!(LineKind::of("   "), LineKind::Blank);
        assert_eq!(LineKind::of(" 12 "), LineKind::StepMarker(Some(12)));
        assert_eq!(
            LineKind::of("  Click the Save button "),
            LineKind::Action("Click the Save button")
        );
        assert_eq!(
            LineKind::of("Navigate to https://example.com"),
            LineKind::Action("Navigate to https://example.com")
        );
        assert_eq!(
            LineKind::of("Expected Outcome:   Record is saved "),
            LineKind::Outcome("Record is saved")
        );
        assert_eq!(LineKind::of("Settings overview"), LineKind::Other);
    }

    #[test]
    fn test_action_keywords_are_case_sensitive() {
        assert_eq!(LineKind::of("click here"), LineKind::Other);
        assert_eq!(LineKind::of("navigate away"), LineKind::Other);
        assert_eq!(LineKind::of("Double-Click the row"), LineKind::Action("Double-Click the row"));
    }

    #[test]
    fn test_action_wins_over_outcome() {
        assert_eq!(
            LineKind::of("Expected Outcome: Click succeeds"),
            LineKind::Action("Expected Outcome: Click succeeds")
        );
    }

    #[test]
    fn test_step_marker_overflow_keeps_kind() {
        assert_eq!(
            LineKind::of("99999999999999999999999"),
            LineKind::StepMarker(None)
        );
    }

    #[test]
    fn test_title_candidates() {
        assert!(is_title_candidate(" Login Page "));
        assert!(!is_title_candidate(""));
        assert!(!is_title_candidate("7"));
        assert!(!is_title_candidate("Made with Scribe"));
        assert!(!is_title_candidate("Made with love"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("1.5"));
    }
}
