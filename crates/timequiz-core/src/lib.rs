//! timequiz-core — Record loading, ordering and the timed prompt loop.
//!
//! This crate defines the quiz data model, the problems-file loader, the
//! question order planner, and the engine that races every answer against a
//! single countdown deadline.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod plan;
pub mod report;
pub mod source;
