//! Rhai artifacts for a fitted verdict.
//!
//! Each artifact is a standalone script. The model formula lives in a helper
//! that takes the coefficients as parameters, and the public entry point
//! (`time(size)` or `max_size(time)`) calls it with the fitted values inlined:
//!
//! ```text
//! fn estimate_time(size, a1, a0) { ... }
//! fn time(size) { estimate_time(size, 0.0001, 0.00002) }
//! ```
//!
//! Only Rhai built-ins are used, so a plain `rhai::Engine` can load the output.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::info;

use crate::codegen::template::{float_literal, render};
use crate::domain::{Complexity, Verdict};
use crate::error::{AppError, ErrorKind};
use crate::math::{INVERSE_HI, INVERSE_LO, INVERSE_TOL, INVERSE_ZERO, inverse_max_iterations};
use crate::models;

const TIME_TEMPLATE: &str = "\
// Generated by benchmike for {{description}}.
// Predicted runtime in seconds for an input of `size`.

fn estimate_time(size, a1, a0) {
    let n = 0.0 + size;
    let t = {{formula}};
    if t < 0.0 { 0.0 } else { t }
}

fn time(size) {
    estimate_time(size, {{a1}}, {{a0}})
}
";

const MAX_SIZE_TEMPLATE: &str = "\
// Generated by benchmike for {{description}}.
// Largest input size whose predicted runtime fits in `time` seconds.
{{helpers}}
fn estimate_max_size(time, a1, a0) {
    let t = 0.0 + time;
{{body}}
    if is_nan(raw) || raw < 0.0 { 0.0 } else { floor(raw) }
}

fn max_size(time) {
    estimate_max_size(time, {{a1}}, {{a0}})
}
";

const INVERSE_TEMPLATE: &str = "
fn linearithmic(x, a1, a0) {
    a1 * x * (ln(x) / ln(2.0)) + a0
}

fn solve_inverse(value, a1, a0) {
    let lo = {{lo}};
    let hi = {{hi}};
    let mid = lo;
    let steps = 0;
    while steps < {{max_iterations}} {
        if abs(hi - lo) <= {{tol}} { break; }
        mid = (lo + hi) / 2.0;
        let diff = linearithmic(mid, a1, a0) - value;
        if abs(diff) < {{zero}} { break; }
        if diff > 0.0 && linearithmic(lo, a1, a0) < value { hi = mid; } else { lo = mid; }
        steps += 1;
    }
    mid
}
";

/// Runtime formula in terms of `n`, `a1` and `a0`.
fn time_formula(model: Complexity) -> &'static str {
    match model {
        Complexity::Constant => "a0",
        Complexity::Logarithmic => "a1 * (ln(n) / ln(2.0)) + a0",
        Complexity::Linear => "a1 * n + a0",
        Complexity::Linearithmic => "a1 * n * (ln(n) / ln(2.0)) + a0",
        Complexity::Quadratic => "a1 * n * n + a0",
        Complexity::Polynomial => "a1 * n * n * n + a0",
        Complexity::SuperPolynomial => "a1 * exp(n * ln(2.0)) + a0",
    }
}

/// Statements that leave the unclamped size in `raw`, given `t`, `a1` and `a0`.
fn max_size_body(model: Complexity) -> &'static str {
    match model {
        Complexity::Constant => {
            "    let raw = if t < a0 { 0.0 } else { parse_float(\"inf\") };"
        }
        Complexity::Logarithmic => "    let raw = exp(((t - a0) / a1) * ln(2.0));",
        Complexity::Linear => "    let raw = (t - a0) / a1;",
        Complexity::Linearithmic => "    let raw = solve_inverse(t, a1, a0);",
        Complexity::Quadratic => "    let raw = sqrt((t - a0) / a1);",
        Complexity::Polynomial => {
            "    let v = (t - a0) / a1;\n    let raw = if v > 0.0 { exp(ln(v) / 3.0) } else { 0.0 };"
        }
        Complexity::SuperPolynomial => "    let raw = ln((t - a0) / a1) / ln(2.0);",
    }
}

/// Renders and writes the artifacts for one verdict.
#[derive(Debug, Clone, Copy)]
pub struct CodeGenerator {
    verdict: Verdict,
}

impl CodeGenerator {
    pub fn new(verdict: Verdict) -> Self {
        Self { verdict }
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Source text of the `time(size)` artifact.
    pub fn time_source(&self) -> Result<String, AppError> {
        let Verdict { model, a1, a0 } = self.verdict;
        let a1 = float_literal(a1)?;
        let a0 = float_literal(a0)?;
        render(
            TIME_TEMPLATE,
            &[
                ("description", model.description()),
                ("formula", time_formula(model)),
                ("a1", a1.as_str()),
                ("a0", a0.as_str()),
            ],
        )
    }

    /// Source text of the `max_size(time)` artifact.
    pub fn max_size_source(&self) -> Result<String, AppError> {
        let Verdict { model, a1, a0 } = self.verdict;
        let helpers = if model.requires_inverse() {
            inverse_source()?
        } else {
            String::new()
        };
        let a1 = float_literal(a1)?;
        let a0 = float_literal(a0)?;
        render(
            MAX_SIZE_TEMPLATE,
            &[
                ("description", model.description()),
                ("helpers", helpers.as_str()),
                ("body", max_size_body(model)),
                ("a1", a1.as_str()),
                ("a0", a0.as_str()),
            ],
        )
    }

    /// Write the `time(size)` artifact to `path`, replacing any previous content.
    pub fn emit_time_function(&self, path: &Path) -> Result<(), AppError> {
        write_artifact(path, &self.time_source()?)
    }

    /// Write the `max_size(time)` artifact to `path`, replacing any previous content.
    pub fn emit_max_size_function(&self, path: &Path) -> Result<(), AppError> {
        write_artifact(path, &self.max_size_source()?)
    }

    /// In-process equivalent of the `time(size)` artifact.
    pub fn time_function(&self) -> Box<dyn Fn(f64) -> f64 + Send + Sync> {
        let Verdict { model, a1, a0 } = self.verdict;
        Box::new(move |size| models::time(model, size, a1, a0))
    }

    /// In-process equivalent of the `max_size(time)` artifact.
    pub fn max_size_function(&self) -> Box<dyn Fn(f64) -> f64 + Send + Sync> {
        let Verdict { model, a1, a0 } = self.verdict;
        Box::new(move |time| models::max_size(model, time, a1, a0))
    }
}

fn inverse_source() -> Result<String, AppError> {
    let lo = float_literal(INVERSE_LO)?;
    let hi = float_literal(INVERSE_HI)?;
    let tol = float_literal(INVERSE_TOL)?;
    let zero = float_literal(INVERSE_ZERO)?;
    let max_iterations = inverse_max_iterations().to_string();
    render(
        INVERSE_TEMPLATE,
        &[
            ("lo", lo.as_str()),
            ("hi", hi.as_str()),
            ("tol", tol.as_str()),
            ("zero", zero.as_str()),
            ("max_iterations", max_iterations.as_str()),
        ],
    )
}

fn write_artifact(path: &Path, source: &str) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            ErrorKind::Io,
            format!("Failed to create '{}': {e}", path.display()),
        )
    })?;
    file.write_all(source.as_bytes()).map_err(|e| {
        AppError::new(
            ErrorKind::Io,
            format!("Failed to write '{}': {e}", path.display()),
        )
    })?;
    info!("Successfully written to {}", path.display());
    Ok(())
}
