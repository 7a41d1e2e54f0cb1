//! Numeric inversion for growth models without a closed-form inverse.
//!
//! The solver is a plain bisection over a fixed domain. The loop bound is
//! derived from the domain width and the tolerance only, so the amount of work
//! is the same for every target value (and the loop ends even when the bracket
//! can no longer shrink because of floating point spacing near `1e9`).

/// Lower end of the search domain.
pub const INVERSE_LO: f64 = 1e-9;
/// Upper end of the search domain.
pub const INVERSE_HI: f64 = 1e9;
/// Absolute bracket tolerance.
pub const INVERSE_TOL: f64 = 1e-9;
/// Midpoint residual treated as an exact hit.
pub const INVERSE_ZERO: f64 = 1e-12;

/// Number of halvings needed to shrink the domain below the tolerance.
pub fn inverse_max_iterations() -> usize {
    ((INVERSE_HI - INVERSE_LO) / INVERSE_TOL).log2().ceil() as usize
}

/// Find `x` in `[INVERSE_LO, INVERSE_HI]` with `f(x) ≈ value`, assuming `f` is
/// non-decreasing over the domain.
///
/// Targets outside the range of `f` converge to the nearest domain end.
pub fn inverse<F>(f: F, value: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let mut lo = INVERSE_LO;
    let mut hi = INVERSE_HI;
    let mut mid = lo;

    for _ in 0..inverse_max_iterations() {
        if (hi - lo).abs() <= INVERSE_TOL {
            break;
        }
        mid = (lo + hi) / 2.0;
        let diff = f(mid) - value;
        if diff.abs() < INVERSE_ZERO {
            break;
        }
        if diff > 0.0 && f(lo) < value {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    mid
}
