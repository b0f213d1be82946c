//! # Vetman
//!
//! Headless validation harness for an external collection runner. Each
//! scenario pairs an iteration-data file with a fixed API collection, shells
//! out to the runner, then re-validates the JSON report it exported: status
//! codes, response times, content types, and response-body fields.

/// Harness configuration: runner path, fixture directories, time budget.
pub mod config;
/// Wire types for the runner report plus scenario and summary types.
pub mod domain;
/// Runner invocation, report validation, and latency statistics.
pub mod engine;
/// Sequential execution of the scenario suite.
pub mod suite;
