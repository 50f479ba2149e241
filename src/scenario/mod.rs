pub mod builder;
pub mod classify;
pub mod events;
pub mod types;

pub use builder::{build_scenarios, build_scenarios_with, Phase};
pub use events::{EventSink, FnSink, NoopSink, ScenarioEvent};
pub use types::{Scenario, Step, DEFAULT_EXPECTED_OUTCOME};
