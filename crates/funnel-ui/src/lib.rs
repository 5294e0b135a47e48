//! Plain-text rendering layer for the funnel reporter.
//!
//! Turns an [`funnel_data::analysis::AnalysisResult`] into the sectioned
//! report printed on stdout, including the right-aligned cohort table.

pub mod report_view;
pub mod table_view;

pub use funnel_core as core;
