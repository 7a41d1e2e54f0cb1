//! Shared domain types.
//!
//! These are kept small and `Copy`/`Clone` so the runner, the fitter, and the
//! code generator can hand them around without ceremony.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Canonical growth model (complexity class).
///
/// `Constant` is never regressed directly; the selector derives it when every
/// shape model fits the data almost perfectly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Constant,
    Logarithmic,
    Linear,
    Linearithmic,
    Quadratic,
    Polynomial,
    SuperPolynomial,
}

impl Complexity {
    /// Every model, cheapest first.
    pub const ALL: [Complexity; 7] = [
        Complexity::Constant,
        Complexity::Logarithmic,
        Complexity::Linear,
        Complexity::Linearithmic,
        Complexity::Quadratic,
        Complexity::Polynomial,
        Complexity::SuperPolynomial,
    ];

    /// Models fitted by regression, in the order ties are broken.
    pub const REGRESSED: [Complexity; 6] = [
        Complexity::Logarithmic,
        Complexity::Linear,
        Complexity::Linearithmic,
        Complexity::Quadratic,
        Complexity::Polynomial,
        Complexity::SuperPolynomial,
    ];

    /// Human-readable label for terminal output and generated files.
    pub fn description(self) -> &'static str {
        match self {
            Complexity::Constant => "O(1) - constant",
            Complexity::Logarithmic => "O(log n) - logarithmic",
            Complexity::Linear => "O(n) - linear",
            Complexity::Linearithmic => "O(n * log n) - linearithmic",
            Complexity::Quadratic => "O(n^2) - quadratic",
            Complexity::Polynomial => "O(n^k) - O(n^3) or worse polynomial",
            Complexity::SuperPolynomial => "O(2^n) - superpolynomial",
        }
    }

    /// Short big-O label used in plot legends.
    pub fn short_name(self) -> &'static str {
        match self {
            Complexity::Constant => "O(1)",
            Complexity::Logarithmic => "O(log n)",
            Complexity::Linear => "O(n)",
            Complexity::Linearithmic => "O(n log n)",
            Complexity::Quadratic => "O(n^2)",
            Complexity::Polynomial => "O(n^3)",
            Complexity::SuperPolynomial => "O(2^n)",
        }
    }

    /// Whether `max_size` needs the numeric bisection solver.
    pub fn requires_inverse(self) -> bool {
        matches!(self, Complexity::Linearithmic)
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// One successful trial: input size and the measured `run` duration (seconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub size: u64,
    pub duration: f64,
}

impl Sample {
    pub fn new(size: u64, duration: f64) -> Self {
        Self { size, duration }
    }
}

/// Regression output for a single model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    pub model: Complexity,
    pub a1: f64,
    pub a0: f64,
    /// Sum of squared residuals; `None` when the system was rank-deficient.
    pub residual: Option<f64>,
}

impl FitResult {
    /// Residual used for ranking: missing residuals rank last.
    pub fn rank_key(&self) -> f64 {
        self.residual.unwrap_or(f64::INFINITY)
    }
}

/// A model together with its fitted coefficients: `time = a1 * g(n) + a0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub model: Complexity,
    pub a1: f64,
    pub a0: f64,
}

/// The winning factor.
pub type Verdict = Factor;

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub target: PathBuf,
    pub timeout_secs: u64,
    pub time_file: PathBuf,
    pub size_file: PathBuf,
    pub step: u64,
    pub start: u64,
    pub count: usize,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}
