//! Formatted terminal output.
//!
//! All console text lives here so the runner and the fitter only log.

use std::path::Path;

use chrono::{DateTime, Local};

use crate::domain::{BenchConfig, Sample, Verdict};
use crate::fit::Selection;
use crate::report::sample_stats;

/// Header with the run configuration and the collected samples.
pub fn format_run_summary(
    config: &BenchConfig,
    samples: &[Sample],
    started_at: &DateTime<Local>,
) -> String {
    let mut out = String::new();

    out.push_str("=== benchmike - time complexity estimate ===\n");
    out.push_str(&format!("Target: {}\n", config.target.display()));
    out.push_str(&format!("Started: {}\n", started_at.format("%Y-%m-%d %H:%M:%S")));
    out.push_str(&format!(
        "Budget: {}s | sizes {} + k*{} | up to {} trials\n",
        config.timeout_secs, config.start, config.step, config.count
    ));
    match sample_stats(samples) {
        Some(stats) => out.push_str(&format!(
            "Samples: n={} | size=[{}, {}] | time=[{:.6}, {:.6}]s | measured {:.3}s\n",
            stats.n,
            stats.size_min,
            stats.size_max,
            stats.duration_min,
            stats.duration_max,
            stats.duration_total
        )),
        None => out.push_str("Samples: none\n"),
    }

    out
}

/// Ranked models from best to worst fit, followed by the verdict.
pub fn format_ranking(selection: &Selection) -> String {
    let mut out = String::new();

    out.push_str("Printing complexities, from best fit to least\n");
    for fit in selection.ranked() {
        match fit.residual {
            Some(_) => out.push_str(&format!("Complexity: {}\n", fit.model.description())),
            None => out.push_str(&format!(
                "Complexity: {}, no regression data\n",
                fit.model.description()
            )),
        }
    }
    for (model, reason) in selection.skipped() {
        out.push_str(&format!("  (skipped {}) {reason}\n", model.description()));
    }

    let verdict = selection.verdict();
    out.push_str(&format!(
        "\nBenchMike's verdict: I'm almost sure it's {}\n",
        verdict.model.description()
    ));
    out.push_str(&format_coefficients(&verdict));
    out.push('\n');

    out
}

/// Fitted `time = a * g(n) + b` coefficients.
pub fn format_coefficients(verdict: &Verdict) -> String {
    format!(
        "{}: a = {:e}, b = {:e}\n",
        verdict.model.short_name(),
        verdict.a1,
        verdict.a0
    )
}

pub fn format_written(path: &Path) -> String {
    format!("Successfully written to {}", path.display())
}
