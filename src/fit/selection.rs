//! Model selection by raw regression residual.
//!
//! The tool fits each candidate model and ranks them by their sum of squared
//! residuals (smallest first, missing residuals last).
//!
//! Selection rules:
//! 1. Skip `SuperPolynomial` once sizes exceed 1000 (`2^n` leaves the float range).
//! 2. Rank by residual; ties keep candidate order.
//! 3. If the best residual is below `1e-8`, the data is flat: prepend a
//!    `Constant` fit at the mean duration.
//! 4. The verdict is the first ranked fit that produced a residual.

use log::info;

use crate::domain::{Complexity, Factor, FitResult, Sample, Verdict};
use crate::error::{AppError, ErrorKind};
use crate::fit::fitter::fit_models;

/// Best residual below this marks the data as constant time.
pub const CONSTANT_THRESHOLD: f64 = 1e-8;

/// Largest size for which `2^n` is still fitted.
pub const SUPER_POLYNOMIAL_MAX_SIZE: u64 = 1000;

/// Output of fitting + selection. Always holds at least one factor.
#[derive(Debug, Clone)]
pub struct Selection {
    ranked: Vec<FitResult>,
    factors: Vec<Factor>,
    verdict: Verdict,
    skipped: Vec<(Complexity, String)>,
}

impl Selection {
    /// Fails with a fitting error when `factors` is empty.
    pub fn new(
        ranked: Vec<FitResult>,
        factors: Vec<Factor>,
        skipped: Vec<(Complexity, String)>,
    ) -> Result<Self, AppError> {
        let Some(&verdict) = factors.first() else {
            return Err(AppError::new(
                ErrorKind::Fitting,
                "A selection needs at least one fitted complexity.",
            ));
        };
        Ok(Self {
            ranked,
            factors,
            verdict,
            skipped,
        })
    }

    /// All fits, best first (including the synthetic constant fit when present).
    pub fn ranked(&self) -> &[FitResult] {
        &self.ranked
    }

    /// `(model, a1, a0)` for every ranked fit that produced a residual.
    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    /// Models that were not attempted and why.
    pub fn skipped(&self) -> &[(Complexity, String)] {
        &self.skipped
    }

    /// The winning factor.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }
}

/// Fit every candidate model and rank them.
pub fn estimate_complexity(samples: &[Sample]) -> Result<Selection, AppError> {
    if samples.is_empty() {
        return Err(AppError::new(ErrorKind::Fitting, "No samples to fit."));
    }

    let max_size = samples.iter().map(|s| s.size).max().unwrap_or(0);
    let mut candidates = Vec::with_capacity(Complexity::REGRESSED.len());
    let mut skipped = Vec::new();
    for model in Complexity::REGRESSED {
        if model == Complexity::SuperPolynomial && max_size > SUPER_POLYNOMIAL_MAX_SIZE {
            skipped.push((
                model,
                format!("largest size {max_size} > {SUPER_POLYNOMIAL_MAX_SIZE} overflows 2^n"),
            ));
            continue;
        }
        candidates.push(model);
    }

    let mut ranked = fit_models(&candidates, samples);
    // Stable sort keeps candidate order among equal residuals.
    ranked.sort_by(|a, b| a.rank_key().total_cmp(&b.rank_key()));

    if let Some(best) = ranked.first().and_then(|f| f.residual) {
        if best < CONSTANT_THRESHOLD {
            ranked.insert(0, constant_fit(samples));
        }
    }

    let mut factors = Vec::with_capacity(ranked.len());
    for fit in &ranked {
        match fit.residual {
            Some(residual) => {
                info!(
                    "Result: {} with a = {}, b = {} (residual {residual:e})",
                    fit.model.description(),
                    fit.a1,
                    fit.a0
                );
                factors.push(Factor {
                    model: fit.model,
                    a1: fit.a1,
                    a0: fit.a0,
                });
            }
            None => info!("Result: {}, no regression data", fit.model.description()),
        }
    }

    let Some(verdict) = factors.first() else {
        return Err(AppError::new(
            ErrorKind::Fitting,
            format!(
                "Could not fit any complexity to {} sample(s); at least 3 are needed.",
                samples.len()
            ),
        ));
    };
    info!("Verdict: {}", verdict.model.description());

    Selection::new(ranked, factors, skipped)
}

/// Flat fit at the mean duration, with its residual about the mean.
fn constant_fit(samples: &[Sample]) -> FitResult {
    let n = samples.len() as f64;
    let mean = samples.iter().map(|s| s.duration).sum::<f64>() / n;
    let sse = samples.iter().map(|s| (s.duration - mean).powi(2)).sum();
    FitResult {
        model: Complexity::Constant,
        a1: 0.0,
        a0: mean,
        residual: Some(sse),
    }
}
