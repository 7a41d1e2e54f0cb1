//! Low-level fitting routine for a single growth model.
//!
//! Given samples `(n_i, t_i)` and a model with size transform `g`, we solve
//!
//! ```text
//! t_i ≈ a1 * g(n_i) + a0
//! ```
//!
//! by ordinary least squares and report the residual sum of squares.

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

use crate::domain::{Complexity, FitResult, Sample};
use crate::math::least_squares;
use crate::models::{forward_x, forward_y};

/// Fit a single model kind to the samples.
///
/// Never fails: an under-determined or non-finite system yields a result with
/// `residual: None` (and zero coefficients when no solution exists at all).
pub fn fit_model(model: Complexity, samples: &[Sample]) -> FitResult {
    let n = samples.len();
    let mut design = DMatrix::<f64>::zeros(n, 2);
    let mut target = DVector::<f64>::zeros(n);
    for (i, s) in samples.iter().enumerate() {
        design[(i, 0)] = forward_x(model, s.size as f64);
        design[(i, 1)] = 1.0;
        target[i] = forward_y(model, s.duration);
    }

    match least_squares(&design, &target) {
        Some(fit) => FitResult {
            model,
            a1: fit.beta[0],
            a0: fit.beta[1],
            residual: fit.sse,
        },
        None => FitResult {
            model,
            a1: 0.0,
            a0: 0.0,
            residual: None,
        },
    }
}

/// Fit several models independently (parallel). Output order follows `models`.
pub fn fit_models(models: &[Complexity], samples: &[Sample]) -> Vec<FitResult> {
    models
        .par_iter()
        .map(|&model| fit_model(model, samples))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples_from(f: impl Fn(f64) -> f64, sizes: &[u64]) -> Vec<Sample> {
        sizes.iter().map(|&n| Sample::new(n, f(n as f64))).collect()
    }

    #[test]
    fn recovers_quadratic_coefficients() {
        let sizes: Vec<u64> = (1..=20).map(|i| i * 50).collect();
        let samples = samples_from(|n| 3e-7 * n * n + 0.002, &sizes);

        let fit = fit_model(Complexity::Quadratic, &samples);
        assert!((fit.a1 - 3e-7).abs() < 1e-12, "a1={}", fit.a1);
        assert!((fit.a0 - 0.002).abs() < 1e-9, "a0={}", fit.a0);
        assert!(fit.residual.unwrap() < 1e-15);
    }

    #[test]
    fn two_samples_have_no_residual() {
        let samples = samples_from(|n| n * 1e-3, &[100, 200]);
        let fit = fit_model(Complexity::Linear, &samples);
        assert!(fit.residual.is_none());
    }

    #[test]
    fn empty_samples_have_no_residual() {
        let fit = fit_model(Complexity::Linear, &[]);
        assert_eq!(fit.residual, None);
    }

    #[test]
    fn parallel_fits_keep_model_order() {
        let sizes: Vec<u64> = (1..=10).map(|i| i * 10).collect();
        let samples = samples_from(|n| n * 1e-4, &sizes);
        let fits = fit_models(&Complexity::REGRESSED, &samples);
        let order: Vec<Complexity> = fits.iter().map(|f| f.model).collect();
        assert_eq!(order, Complexity::REGRESSED.to_vec());
    }
}
