pub mod extract;
pub mod pipeline;
pub mod report;
pub mod scenario;
pub mod utils;

// Re-export common items
pub use pipeline::{process_file, process_paths};
pub use report::generate_report;
pub use scenario::{build_scenarios, Scenario, Step};
