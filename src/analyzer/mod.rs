// Analyzer module: aggregates submodules for different aspects of analysis.

pub mod aggregation;
pub mod anomaly;
pub mod forecast;
pub mod recommendations;
pub mod report_builder;

// Re-export the main Analyzer implementation for ease of use.
pub use report_builder::{Analyzer, AnalyzerImpl};
