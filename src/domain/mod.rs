//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the growth model enum (`Complexity`)
//! - measured samples (`Sample`)
//! - fit outputs (`FitResult`, `Factor`, `Verdict`)
//! - the run configuration (`BenchConfig`)

pub mod types;

pub use types::*;
