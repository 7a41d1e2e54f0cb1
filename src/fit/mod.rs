//! Complexity fitting orchestration.
//!
//! Responsibilities:
//!
//! - linearize samples per growth model and solve OLS (parallel)
//! - rank fits by residual and detect constant-time data
//! - produce the ordered factors list and the verdict

pub mod fitter;
pub mod selection;

pub use fitter::*;
pub use selection::*;
