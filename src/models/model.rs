//! Formulas for each growth model.
//!
//! The fitter relies on two primitive operations:
//! - linearize a sample (`forward_x`, `forward_y`) so OLS can fit `a1`, `a0`
//! - predict runtime and its inverse (`time`, `max_size`) from fitted coefficients
//!
//! These are implemented here for each model kind.

use crate::domain::Complexity;
use crate::math::inverse;

/// Size transform used as the regression regressor.
pub fn forward_x(model: Complexity, size: f64) -> f64 {
    match model {
        Complexity::Constant => 1.0,
        Complexity::Logarithmic => size.log2(),
        Complexity::Linear => size,
        Complexity::Linearithmic => size * size.log2(),
        Complexity::Quadratic => size * size,
        Complexity::Polynomial => size * size * size,
        Complexity::SuperPolynomial => size.exp2(),
    }
}

/// Time transform used as the regression target.
pub fn forward_y(_model: Complexity, time: f64) -> f64 {
    time
}

/// Predicted runtime for `size`, clamped at zero.
pub fn time(model: Complexity, size: f64, a1: f64, a0: f64) -> f64 {
    let t = match model {
        Complexity::Constant => a0,
        _ => a1 * forward_x(model, size) + a0,
    };
    if t < 0.0 { 0.0 } else { t }
}

/// Largest size whose predicted runtime fits in `time`.
///
/// Results are floored to whole sizes. `Constant` answers `+inf` once the
/// budget covers its fixed cost.
pub fn max_size(model: Complexity, time: f64, a1: f64, a0: f64) -> f64 {
    let raw = match model {
        Complexity::Constant => {
            if time < a0 {
                0.0
            } else {
                f64::INFINITY
            }
        }
        Complexity::Logarithmic => ((time - a0) / a1).exp2(),
        Complexity::Linear => (time - a0) / a1,
        Complexity::Linearithmic => inverse(|x| a1 * x * x.log2() + a0, time),
        Complexity::Quadratic => ((time - a0) / a1).sqrt(),
        Complexity::Polynomial => ((time - a0) / a1).cbrt(),
        Complexity::SuperPolynomial => ((time - a0) / a1).log2(),
    };
    clamp_size(raw)
}

/// Floor to a whole size; NaN and negative values become zero.
pub fn clamp_size(raw: f64) -> f64 {
    if raw.is_nan() || raw < 0.0 {
        0.0
    } else {
        raw.floor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A1: f64 = 2.5e-6;
    const A0: f64 = 1.0e-3;

    #[test]
    fn inverse_law_holds_for_regressed_models() {
        let sizes = [2.0, 17.0, 100.0, 999.0];
        for model in Complexity::REGRESSED {
            for &n in &sizes {
                if model == Complexity::SuperPolynomial && n > 60.0 {
                    // a1 * 2^n dwarfs a0; the round trip loses all precision.
                    continue;
                }
                let t = time(model, n, A1, A0);
                let back = max_size(model, t, A1, A0);
                assert!(
                    (back - n).abs() <= 1.0,
                    "{model:?}: max_size(time({n})) = {back}"
                );
            }
        }
    }

    #[test]
    fn constant_model_ignores_size() {
        assert_eq!(time(Complexity::Constant, 1.0, 9.0, 0.25), 0.25);
        assert_eq!(time(Complexity::Constant, 1e6, 9.0, 0.25), 0.25);
        assert_eq!(max_size(Complexity::Constant, 0.1, 0.0, 0.25), 0.0);
        assert_eq!(max_size(Complexity::Constant, 0.3, 0.0, 0.25), f64::INFINITY);
    }

    #[test]
    fn time_is_clamped_at_zero() {
        // Negative offset would make small sizes predict negative runtime.
        assert_eq!(time(Complexity::Linearithmic, 2.0, 1e-6, -1.0), 0.0);
        assert_eq!(time(Complexity::Linear, 1.0, 1.0, -5.0), 0.0);
    }

    #[test]
    fn max_size_below_offset_is_zero() {
        assert_eq!(max_size(Complexity::Linear, 0.0, 1e-3, 1.0), 0.0);
        assert_eq!(max_size(Complexity::Quadratic, 0.0, 1e-3, 1.0), 0.0);
    }

    #[test]
    fn forward_x_matches_growth_shape() {
        assert_eq!(forward_x(Complexity::Logarithmic, 8.0), 3.0);
        assert_eq!(forward_x(Complexity::Linearithmic, 8.0), 24.0);
        assert_eq!(forward_x(Complexity::Polynomial, 3.0), 27.0);
        assert_eq!(forward_x(Complexity::SuperPolynomial, 10.0), 1024.0);
        assert_eq!(forward_y(Complexity::Quadratic, 0.5), 0.5);
    }
}
