//! Data layer for the funnel reporter.
//!
//! Responsible for reading the CSV event log, extracting per-stage user sets,
//! running the funnel and decision-point analysis and aggregating cohorts.

pub mod aggregator;
pub mod analysis;
pub mod reader;
pub mod stages;

pub use funnel_core as core;
