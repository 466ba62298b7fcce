pub mod body;
pub mod cycle;
pub mod languages;
pub mod metrics;
pub mod model;
pub mod operations;
pub mod orchestrator;
pub mod properties;
pub mod report;
pub(crate) mod schema_graph;
pub mod snippets;

pub use cycle::CycleGuard;
pub use languages::TargetLanguage;
pub use orchestrator::{GenerationOutput, OperationOutput, Orchestrator, SynthesisConfig, generate};

#[cfg(test)]
mod tests;
