//! Shared types for the onboarding funnel reporter.
//!
//! Holds the event model, the ordered funnel definition, rate calculations,
//! number formatting, CLI settings and the crate-wide error type.

pub mod calculations;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
