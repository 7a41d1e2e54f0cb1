//! `benchmike` library crate.
//!
//! Estimates the time complexity of a Rhai routine: it benchmarks the routine
//! in isolated worker processes, fits growth models to the measurements and
//! writes two standalone scripts, `time(size)` and `max_size(time)`.
//!
//! The binary (`benchmike`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the runner, fitter and code generator are reusable on their own
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod bench;
pub mod cli;
pub mod codegen;
pub mod domain;
pub mod error;
pub mod fit;
pub mod logging;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
