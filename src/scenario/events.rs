use super::builder::Phase;
use std::fmt;

/// Diagnostic events emitted while a scenario is being built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioEvent {
    InputReceived {
        line_count: usize,
    },
    PhaseStarted {
        phase: Phase,
    },
    TitleFound {
        title: String,
        line_index: usize,
    },
    TitleMissing {
        reason: String,
    },
    LineProcessed {
        index: usize,
        kind: &'static str,
        text: String,
    },
    StepStarted {
        step_number: Option<u64>,
        description: String,
    },
    OutcomeAttached {
        outcome: String,
    },
    OutcomeDropped {
        outcome: String,
    },
    Finished {
        title: String,
        step_count: usize,
    },
}

impl fmt::Display for ScenarioEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioEvent::InputReceived { line_count } => {
                write!(f, "Received {} text lines", line_count)
            }
            ScenarioEvent::PhaseStarted { phase } => write!(f, "Entering phase {:?}", phase),
            ScenarioEvent::TitleFound { title, line_index } => {
                write!(f, "Found scenario: {} (line {})", title, line_index)
            }
            ScenarioEvent::TitleMissing { reason } => {
                write!(f, "No scenario name found: {}", reason)
            }
            ScenarioEvent::LineProcessed { index, kind, text } => {
                write!(f, "Processing line {} [{}]: {}", index, kind, text)
            }
            ScenarioEvent::StepStarted {
                step_number,
                description,
            } => match step_number {
                Some(n) => write!(f, "Found step {}: {}", n, description),
                None => write!(f, "Found step: {}", description),
            },
            ScenarioEvent::OutcomeAttached { outcome } => {
                write!(f, "Found expected outcome: {}", outcome)
            }
            ScenarioEvent::OutcomeDropped { outcome } => {
                write!(f, "Dropped expected outcome with no open step: {}", outcome)
            }
            ScenarioEvent::Finished { title, step_count } => {
                write!(f, "Final scenario '{}' with {} steps", title, step_count)
            }
        }
    }
}

/// Receiver for builder diagnostics
pub trait EventSink {
    fn emit(&mut self, event: ScenarioEvent);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&mut self, _event: ScenarioEvent) {}
}

impl EventSink for Vec<ScenarioEvent> {
    fn emit(&mut self, event: ScenarioEvent) {
        self.push(event);
    }
}

/// Adapts a closure into a sink
pub struct FnSink<F>(pub F);

impl<F: FnMut(ScenarioEvent)> EventSink for FnSink<F> {
    fn emit(&mut self, event: ScenarioEvent) {
        (self.0)(event)
    }
}
