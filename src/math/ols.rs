//! Ordinary least squares solver.
//!
//! Every growth model is linear after its size transform, so fitting reduces to
//! the two-column problem:
//!
//! ```text
//! minimize Σ (y_i - (a1 * x_i + a0))^2
//! ```
//!
//! Implementation choices:
//! - We solve with SVD so tall design matrices (many more samples than
//!   columns) are handled robustly.
//! - Rank is decided with the usual relative cutoff
//!   `σ_max * max(rows, cols) * ε`; singular values below it count as zero.
//! - A residual is reported only for full-rank systems with more rows than
//!   columns. Anything else is under-determined and the caller treats it as
//!   "no regression data".

use nalgebra::{DMatrix, DVector};

/// Iteration cap for the SVD; two-column systems converge in a handful.
const MAX_SVD_ITERATIONS: usize = 1_000;

/// Solution of a least squares problem.
#[derive(Debug, Clone)]
pub struct LeastSquares {
    pub beta: DVector<f64>,
    pub rank: usize,
    /// Sum of squared residuals, present only for full-rank over-determined systems.
    pub sse: Option<f64>,
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the inputs are not finite or no finite solution exists.
pub fn least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<LeastSquares> {
    if x.nrows() != y.len() || x.nrows() == 0 {
        return None;
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return None;
    }

    // Squares of huge regressors (2^n near n = 1000) overflow inside the
    // decomposition; treat such a system as unsolvable.
    if !x.norm().is_finite() || !y.norm().is_finite() {
        return None;
    }

    let (rows, cols) = x.shape();
    let svd = x.clone().try_svd(true, true, f64::EPSILON, MAX_SVD_ITERATIONS)?;
    let sigma_max = svd.singular_values.max();
    let tol = sigma_max * (rows.max(cols) as f64) * f64::EPSILON;
    let rank = svd.singular_values.iter().filter(|&&s| s > tol).count();

    let beta = svd.solve(y, tol).ok()?;
    if !beta.iter().all(|v| v.is_finite()) {
        return None;
    }

    let sse = if rank == cols && rows > cols {
        let fitted = x * &beta;
        Some((y - fitted).norm_squared())
    } else {
        None
    };

    Some(LeastSquares { beta, rank, sse })
}
