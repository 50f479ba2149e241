//! Scenario builder.
//!
//! Runs in two phases over the same line sequence:
//! - [`Phase::SeekingTitle`] locates the first action line and walks back to
//!   the nearest line that can serve as a title.
//! - [`Phase::AccumulatingSteps`] folds every line into a [`StepAccumulator`].
//!
//! A missing title short-circuits the build; a scenario is never emitted
//! without a name.

use super::classify::{is_title_candidate, LineKind};
use super::events::{EventSink, NoopSink, ScenarioEvent};
use super::types::{Scenario, Step};

/// Build phases, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SeekingTitle,
    AccumulatingSteps,
}

/// Result of the title phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleSearch {
    Found {
        title: String,
        line_index: usize,
        action_index: usize,
    },
    NoActionLine,
    NothingBeforeAction {
        action_index: usize,
    },
}

/// Build scenarios from recognised text lines without diagnostics
pub fn build_scenarios<L: AsRef<str>>(lines: &[L]) -> Vec<Scenario> {
    build_scenarios_with(lines, &mut NoopSink)
}

/// Build scenarios from recognised text lines, reporting progress to `sink`
///
/// Returns at most one scenario. Malformed input degrades to an empty result.
pub fn build_scenarios_with<L, S>(lines: &[L], sink: &mut S) -> Vec<Scenario>
where
    L: AsRef<str>,
    S: EventSink + ?Sized,
{
    sink.emit(ScenarioEvent::InputReceived {
        line_count: lines.len(),
    });

    sink.emit(ScenarioEvent::PhaseStarted {
        phase: Phase::SeekingTitle,
    });
    let title = match seek_title(lines) {
        TitleSearch::Found {
            title, line_index, ..
        } => {
            sink.emit(ScenarioEvent::TitleFound {
                title: title.clone(),
                line_index,
            });
            title
        }
        TitleSearch::NoActionLine => {
            sink.emit(ScenarioEvent::TitleMissing {
                reason: "no action line".to_string(),
            });
            return Vec::new();
        }
        TitleSearch::NothingBeforeAction { action_index } => {
            sink.emit(ScenarioEvent::TitleMissing {
                reason: format!("no title line before action at line {}", action_index),
            });
            return Vec::new();
        }
    };

    sink.emit(ScenarioEvent::PhaseStarted {
        phase: Phase::AccumulatingSteps,
    });
    let steps = accumulate_steps(lines, &mut *sink);

    sink.emit(ScenarioEvent::Finished {
        title: title.clone(),
        step_count: steps.len(),
    });

    vec![Scenario { name: title, steps }]
}

/// Title phase: nearest qualifying line before the first action line
pub fn seek_title<L: AsRef<str>>(lines: &[L]) -> TitleSearch {
    let action_index = lines
        .iter()
        .position(|line| matches!(LineKind::of(line.as_ref()), LineKind::Action(_)));

    let Some(action_index) = action_index else {
        return TitleSearch::NoActionLine;
    };

    lines[..action_index]
        .iter()
        .enumerate()
        .rev()
        .find(|(_, line)| is_title_candidate(line.as_ref()))
        .map(|(line_index, line)| TitleSearch::Found {
            title: line.as_ref().trim().to_string(),
            line_index,
            action_index,
        })
        .unwrap_or(TitleSearch::NothingBeforeAction { action_index })
}

/// Step phase: forward pass over every line
pub fn accumulate_steps<L, S>(lines: &[L], sink: &mut S) -> Vec<Step>
where
    L: AsRef<str>,
    S: EventSink + ?Sized,
{
    lines
        .iter()
        .enumerate()
        .fold(StepAccumulator::default(), |mut acc, (index, line)| {
            acc.feed(index, LineKind::of(line.as_ref()), &mut *sink);
            acc
        })
        .finish()
}

/// State of the step phase
#[derive(Debug, Default, Clone)]
pub struct StepAccumulator {
    closed: Vec<Step>,
    open: Option<Step>,
    /// Last digits-only marker seen; diagnostics only
    current_step_num: Option<u64>,
}

impl StepAccumulator {
    pub fn feed<S: EventSink + ?Sized>(&mut self, index: usize, kind: LineKind<'_>, sink: &mut S) {
        if matches!(kind, LineKind::Boilerplate | LineKind::Blank) {
            return;
        }

        sink.emit(ScenarioEvent::LineProcessed {
            index,
            kind: kind.label(),
            text: line_text(&kind),
        });

        match kind {
            LineKind::StepMarker(Some(n)) => self.current_step_num = Some(n),
            LineKind::StepMarker(None) => {}
            LineKind::Action(text) => {
                sink.emit(ScenarioEvent::StepStarted {
                    step_number: self.current_step_num,
                    description: text.to_string(),
                });
                if let Some(step) = self.open.replace(Step::new(text)) {
                    self.closed.push(step);
                }
            }
            LineKind::Outcome(outcome) => match self.open.as_mut() {
                Some(step) => {
                    step.expected_outcome = outcome.to_string();
                    sink.emit(ScenarioEvent::OutcomeAttached {
                        outcome: outcome.to_string(),
                    });
                }
                None => sink.emit(ScenarioEvent::OutcomeDropped {
                    outcome: outcome.to_string(),
                }),
            },
            LineKind::Boilerplate | LineKind::Blank | LineKind::Other => {}
        }
    }

    pub fn current_step_num(&self) -> Option<u64> {
        self.current_step_num
    }

    /// Flush the open step and return steps in document order
    pub fn finish(mut self) -> Vec<Step> {
        if let Some(step) = self.open.take() {
            self.closed.push(step);
        }
        self.closed
    }
}

fn line_text(kind: &LineKind<'_>) -> String {
    match kind {
        LineKind::Action(text) | LineKind::Outcome(text) => text.to_string(),
        LineKind::StepMarker(Some(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::types::DEFAULT_EXPECTED_OUTCOME;

    #[test]
    fn test_login_page_with_outcome() {
        let lines = [
            "Login Page",
            "1",
            "Click Login button",
            "Expected Outcome: User is logged in",
        ];
        let scenarios = build_scenarios(&lines);

        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].name, "Login Page");
        assert_eq!(
            scenarios[0].steps,
            vec![Step {
                description: "Click Login button".to_string(),
                expected_outcome: "User is logged in".to_string(),
            }]
        );
    }

    #[test]
    fn test_steps_without_outcomes_keep_default() {
        let lines = ["Checkout Flow", "Click Checkout", "Click Confirm"];
        let scenarios = build_scenarios(&lines);

        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].name, "Checkout Flow");
        assert_eq!(scenarios[0].steps.len(), 2);
        assert_eq!(scenarios[0].steps[0].description, "Click Checkout");
        assert_eq!(scenarios[0].steps[1].description, "Click Confirm");
        assert!(scenarios[0]
            .steps
            .iter()
            .all(|s| s.expected_outcome == DEFAULT_EXPECTED_OUTCOME));
    }

    #[test]
    fn test_boilerplate_and_blank_lines_skipped_for_title() {
        let lines = ["Made with Scribe", "", "Home Page", "Navigate to Settings"];
        let scenarios = build_scenarios(&lines);

        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].name, "Home Page");
        assert_eq!(scenarios[0].steps[0].description, "Navigate to Settings");
    }

    #[test]
    fn test_no_action_line_yields_nothing() {
        assert!(build_scenarios(&["Made with Scribe", "42", ""]).is_empty());
        assert!(build_scenarios(&["Welcome", "Open the menu", "click lowercase"]).is_empty());
        assert_eq!(
            seek_title(&["Welcome", "Open the menu"]),
            TitleSearch::NoActionLine
        );
    }

    #[test]
    fn test_empty_input() {
        let lines: Vec<String> = Vec::new();
        assert!(build_scenarios(&lines).is_empty());
    }

    #[test]
    fn test_action_without_title_yields_nothing() {
        let lines = ["", "Made with Scribe", "  3  ", "Click Start"];
        assert!(build_scenarios(&lines).is_empty());
        assert_eq!(
            seek_title(&lines),
            TitleSearch::NothingBeforeAction { action_index: 3 }
        );

        assert!(build_scenarios(&["Click Start", "Fancy title"]).is_empty());
    }

    #[test]
    fn test_outcome_before_any_action_is_dropped() {
        let lines = ["Title", "Expected Outcome: X", "Click Go"];
        let scenarios = build_scenarios(&lines);

        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].steps.len(), 1);
        assert_eq!(scenarios[0].steps[0].description, "Click Go");
        assert_eq!(
            scenarios[0].steps[0].expected_outcome,
            DEFAULT_EXPECTED_OUTCOME
        );
        // The nearest qualifying line wins, even an outcome line.
        assert_eq!(scenarios[0].name, "Expected Outcome: X");
    }

    #[test]
    fn test_nearest_candidate_becomes_title() {
        let lines = [
            "Made with Scribe",
            "Onboarding guide",
            "Create a new project",
            "1",
            "",
            "Click New",
        ];
        let scenarios = build_scenarios(&lines);
        assert_eq!(scenarios[0].name, "Create a new project");
    }

    #[test]
    fn test_later_outcome_overwrites_earlier_one() {
        let lines = [
            "Settings",
            "Click Profile",
            "Expected Outcome: Profile opens",
            "Some note",
            "Expected Outcome:   Profile form is visible  ",
            "2",
            "Click Save",
            "Made with Scribe",
        ];
        let scenarios = build_scenarios(&lines);
        let steps = &scenarios[0].steps;

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].expected_outcome, "Profile form is visible");
        assert_eq!(steps[1].description, "Click Save");
        assert!(steps[1].has_default_outcome());
    }

    #[test]
    fn test_descriptions_are_trimmed() {
        let lines = ["  Title  ", "   Click   Save  "];
        let scenarios = build_scenarios(&lines);
        assert_eq!(scenarios[0].name, "Title");
        assert_eq!(scenarios[0].steps[0].description, "Click   Save");
    }

    #[test]
    fn test_build_is_idempotent() {
        let lines: Vec<String> = ["Reports", "Click Export", "Expected Outcome: CSV downloads"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(build_scenarios(&lines), build_scenarios(&lines));
    }

    #[test]
    fn test_step_marker_reported_not_emitted() {
        let lines = ["Inbox", "4", "Click Compose"];
        let mut events: Vec<ScenarioEvent> = Vec::new();
        let scenarios = build_scenarios_with(&lines, &mut events);

        assert_eq!(scenarios[0].steps[0].description, "Click Compose");
        assert!(events.contains(&ScenarioEvent::StepStarted {
            step_number: Some(4),
            description: "Click Compose".to_string(),
        }));
        assert!(matches!(
            events.last(),
            Some(ScenarioEvent::Finished { step_count: 1, .. })
        ));
    }

    #[test]
    fn test_dropped_outcome_is_traced() {
        let lines = ["Title", "Expected Outcome: X", "Click Go"];
        let mut events: Vec<ScenarioEvent> = Vec::new();
        build_scenarios_with(&lines, &mut events);

        assert!(events.contains(&ScenarioEvent::OutcomeDropped {
            outcome: "X".to_string()
        }));
    }

    #[test]
    fn test_accumulator_tracks_marker() {
        let mut acc = StepAccumulator::default();
        acc.feed(0, LineKind::of("17"), &mut NoopSink);
        assert_eq!(acc.current_step_num(), Some(17));
        acc.feed(1, LineKind::of("Click Next"), &mut NoopSink);
        assert_eq!(acc.finish().len(), 1);
    }

    #[test]
    fn test_oversized_marker_keeps_previous_number() {
        let mut acc = StepAccumulator::default();
        acc.feed(0, LineKind::of("3"), &mut NoopSink);
        acc.feed(1, LineKind::of("99999999999999999999999"), &mut NoopSink);
        assert_eq!(acc.current_step_num(), Some(3));
    }
}
