//! bizpulse — revenue and risk analytics over tabular sales/invoice exports.
//!
//! The core is a pure pipeline: CSV rows are normalized into [`model::Sale`]s,
//! folded into KPIs, scanned for daily anomalies, projected forward and turned
//! into recommendations, producing one immutable [`model::SalesReport`].
//! Alerting and narrative summaries are pluggable collaborators wired up by
//! [`pipeline::Pipeline`].

pub mod analyzer;
pub mod config;
pub mod model;
pub mod normalizer;
pub mod notifier;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod summarizer;
pub mod utils;
