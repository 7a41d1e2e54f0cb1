//! Code generation for the fitted verdict.
//!
//! Produces two standalone Rhai scripts: `time(size)` and `max_size(time)`.

pub mod generator;
pub mod template;

pub use generator::CodeGenerator;
