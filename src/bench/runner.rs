//! Budgeted trial loop.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::bench::process::ProcessExecutor;
use crate::bench::protocol::TrialOutcome;
use crate::bench::target::TargetUnit;
use crate::domain::Sample;
use crate::error::{AppError, ErrorKind};

/// Runs a single trial of the target at `size` with `budget_secs` to spare.
pub trait TrialExecutor {
    fn run_trial(&mut self, size: u64, budget_secs: u64) -> Result<TrialOutcome, AppError>;
}

/// Measures a target over increasing sizes until the count or time budget runs out.
#[derive(Debug)]
pub struct CodeBenchmark<E = ProcessExecutor> {
    executor: E,
    timeout_secs: u64,
}

impl CodeBenchmark<ProcessExecutor> {
    /// Parse `target` up front and run trials through this same executable.
    pub fn new(target: &Path, timeout_secs: u64) -> Result<Self, AppError> {
        let program = std::env::current_exe().map_err(|e| {
            AppError::new(ErrorKind::Io, format!("Failed to locate own executable: {e}"))
        })?;
        Self::with_worker_program(target, timeout_secs, program)
    }

    /// Like [`CodeBenchmark::new`] but with an explicit worker executable.
    pub fn with_worker_program(
        target: &Path,
        timeout_secs: u64,
        program: impl Into<PathBuf>,
    ) -> Result<Self, AppError> {
        // Parse once in the parent so syntax errors surface before any trial.
        TargetUnit::load(target)?;
        info!(
            "Started with path {}, timeout {timeout_secs}",
            target.display()
        );
        Ok(Self::with_executor(
            ProcessExecutor::new(program, target),
            timeout_secs,
        ))
    }
}

impl<E: TrialExecutor> CodeBenchmark<E> {
    pub fn with_executor(executor: E, timeout_secs: u64) -> Self {
        Self {
            executor,
            timeout_secs,
        }
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run up to `count` trials starting at `start`, growing by `step`.
    ///
    /// A timed-out trial ends the loop and keeps the samples gathered so far.
    /// A target without entry points or a failing target aborts with an error.
    pub fn run_benchmark(
        &mut self,
        step: u64,
        start: u64,
        count: usize,
    ) -> Result<Vec<Sample>, AppError> {
        let timeout = self.timeout_secs as f64;
        let mut samples = Vec::with_capacity(count.min(1024));
        let mut size = start;
        let mut passes = 0usize;
        let mut elapsed = 0.0_f64;
        let mut left = 0u64;

        while elapsed < timeout && passes < count {
            left = (timeout - elapsed).floor() as u64;
            if left == 0 {
                break;
            }

            let outcome = self.executor.run_trial(size, left)?;
            info!("trial(size={size}, budget={left}s) = {outcome:?}");
            match outcome {
                TrialOutcome::Success {
                    size: measured,
                    run_duration,
                    total_duration,
                } => {
                    elapsed += total_duration.max(0.0);
                    samples.push(Sample::new(measured, run_duration.max(0.0)));
                    size = size.saturating_add(step);
                    passes += 1;
                }
                TrialOutcome::Timeout { elapsed: spent } => {
                    println!("Finished benchmarking");
                    warn!("Benchmark timed out at {passes} passes after {spent:.3} s");
                    break;
                }
                TrialOutcome::MissingEntryPoints { message } => {
                    return Err(AppError::new(ErrorKind::MissingEntryPoints, message));
                }
                TrialOutcome::Failure { message } => {
                    return Err(AppError::new(ErrorKind::Runtime, message));
                }
            }
        }

        info!("Finished benchmarking with {passes} passes and {left} s left");
        Ok(samples)
    }
}
