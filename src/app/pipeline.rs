//! Shared benchmark pipeline.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! benchmark -> fit/selection -> code generation
//!
//! The CLI handler then only deals with presentation.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::info;

use crate::bench::{CodeBenchmark, TrialExecutor};
use crate::codegen::CodeGenerator;
use crate::domain::{BenchConfig, Sample, Verdict};
use crate::error::AppError;
use crate::fit::{Selection, estimate_complexity};

/// All computed outputs of a single `benchmike run`.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub started_at: DateTime<Local>,
    pub samples: Vec<Sample>,
    pub selection: Selection,
    pub verdict: Verdict,
    /// Artifacts written, in order: time function, then max-size function.
    pub written: Vec<PathBuf>,
}

/// Run the full pipeline, spawning workers from `worker_program` or, when
/// `None`, from the current executable.
pub fn run_pipeline(config: &BenchConfig, worker_program: Option<&Path>) -> Result<RunOutput, AppError> {
    let bench = match worker_program {
        Some(program) => {
            CodeBenchmark::with_worker_program(&config.target, config.timeout_secs, program)?
        }
        None => CodeBenchmark::new(&config.target, config.timeout_secs)?,
    };
    run_with_benchmark(config, bench)
}

/// Run the pipeline with a prepared benchmark.
///
/// Artifacts are written only once fitting succeeded.
pub fn run_with_benchmark<E: TrialExecutor>(
    config: &BenchConfig,
    mut bench: CodeBenchmark<E>,
) -> Result<RunOutput, AppError> {
    let started_at = Local::now();
    info!("Run started at {}", started_at.format("%Y-%m-%d %H:%M:%S"));

    // 1) Measure.
    let samples = bench.run_benchmark(config.step, config.start, config.count)?;

    // 2) Fit and select.
    let selection = estimate_complexity(&samples)?;
    let verdict = selection.verdict();

    // 3) Emit artifacts.
    let generator = CodeGenerator::new(verdict);
    generator.emit_time_function(&config.time_file)?;
    generator.emit_max_size_function(&config.size_file)?;

    Ok(RunOutput {
        started_at,
        samples,
        selection,
        verdict,
        written: vec![config.time_file.clone(), config.size_file.clone()],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::TrialOutcome;
    use crate::domain::Complexity;
    use crate::error::ErrorKind;

    /// Linear durations with a small alternating wobble.
    struct Synthetic {
        calls: usize,
        fail_at: Option<usize>,
    }

    impl TrialExecutor for Synthetic {
        fn run_trial(&mut self, size: u64, _budget_secs: u64) -> Result<TrialOutcome, AppError> {
            self.calls += 1;
            if self.fail_at == Some(self.calls) {
                return Ok(TrialOutcome::Failure {
                    message: "boom".to_string(),
                });
            }
            let wobble = if self.calls % 2 == 0 { 0.002 } else { 0.0 };
            let duration = 1e-4 * size as f64 + wobble;
            Ok(TrialOutcome::Success {
                size,
                run_duration: duration,
                total_duration: duration,
            })
        }
    }

    fn config(dir: &Path) -> BenchConfig {
        BenchConfig {
            target: dir.join("target.rhai"),
            timeout_secs: 60,
            time_file: dir.join("time_source.rhai"),
            size_file: dir.join("size_source.rhai"),
            step: 100,
            start: 100,
            count: 20,
            plot: false,
            plot_width: 80,
            plot_height: 20,
        }
    }

    #[test]
    fn writes_both_artifacts_after_fit() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let bench = CodeBenchmark::with_executor(
            Synthetic {
                calls: 0,
                fail_at: None,
            },
            config.timeout_secs,
        );

        let out = run_with_benchmark(&config, bench).unwrap();
        assert_eq!(out.samples.len(), 20);
        assert_eq!(out.verdict, out.selection.factors()[0]);
        assert_eq!(out.verdict.model, Complexity::Linear);
        assert!((out.verdict.a1 - 1e-4).abs() < 1e-5);

        let time_src = std::fs::read_to_string(&config.time_file).unwrap();
        let size_src = std::fs::read_to_string(&config.size_file).unwrap();
        assert!(time_src.contains("fn time(size)"));
        assert!(size_src.contains("fn max_size(time)"));
        assert_eq!(out.written, vec![config.time_file.clone(), config.size_file.clone()]);
    }

    #[test]
    fn failed_benchmark_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let bench = CodeBenchmark::with_executor(
            Synthetic {
                calls: 0,
                fail_at: Some(4),
            },
            config.timeout_secs,
        );

        let err = run_with_benchmark(&config, bench).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Runtime);
        assert!(!config.time_file.exists());
        assert!(!config.size_file.exists());
    }

    #[test]
    fn too_few_samples_is_a_fitting_error_without_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path());
        config.count = 2;
        let bench = CodeBenchmark::with_executor(
            Synthetic {
                calls: 0,
                fail_at: None,
            },
            config.timeout_secs,
        );

        let err = run_with_benchmark(&config, bench).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fitting);
        assert!(!config.time_file.exists());
    }
}
