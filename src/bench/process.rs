//! Parent-side supervision of worker processes.
//!
//! One worker per trial, never more than one alive. The parent blocks on the
//! worker's stdout (through a reader thread and an in-process channel) until
//! the result line arrives or the deadline passes. A worker that is still
//! running at the deadline is killed and the trial counts as a timeout.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::bench::protocol::TrialOutcome;
use crate::bench::runner::TrialExecutor;
use crate::error::{AppError, ErrorKind};

/// Extra time the parent waits beyond the worker's own watchdog.
pub const SUPERVISOR_GRACE: Duration = Duration::from_secs(1);

/// How long the parent waits for a worker given `budget_secs`.
fn supervisor_deadline(budget_secs: u64) -> Duration {
    Duration::from_secs(budget_secs).saturating_add(SUPERVISOR_GRACE)
}

/// Runs each trial in a fresh `benchmike worker` process.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    program: PathBuf,
    target: PathBuf,
}

impl ProcessExecutor {
    /// `program` must accept the hidden `worker` subcommand.
    pub fn new(program: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            target: target.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn target(&self) -> &Path {
        &self.target
    }
}

impl TrialExecutor for ProcessExecutor {
    fn run_trial(&mut self, size: u64, budget_secs: u64) -> Result<TrialOutcome, AppError> {
        let mut child = Command::new(&self.program)
            .arg("worker")
            .arg("--target")
            .arg(&self.target)
            .arg("--size")
            .arg(size.to_string())
            .arg("--timeout")
            .arg(budget_secs.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                AppError::new(
                    ErrorKind::Io,
                    format!("Failed to spawn worker '{}': {e}", self.program.display()),
                )
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| AppError::new(ErrorKind::Io, "Worker stdout was not captured."))?;

        let (tx, rx) = mpsc::channel();
        let reader = thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { return };
                match TrialOutcome::from_line(&line) {
                    Some(outcome) => {
                        let _ = tx.send(outcome);
                        return;
                    }
                    None if line.trim().is_empty() => {}
                    None => debug!("worker stdout: {line}"),
                }
            }
        });

        let started = Instant::now();
        let received = rx.recv_timeout(supervisor_deadline(budget_secs));
        if matches!(received, Err(RecvTimeoutError::Timeout)) {
            warn!("worker for size {size} missed its {budget_secs}s deadline, killing it");
            if let Err(e) = child.kill() {
                warn!("failed to kill worker: {e}");
            }
        }

        let status = child
            .wait()
            .map_err(|e| AppError::new(ErrorKind::Io, format!("Failed to reap worker: {e}")))?;
        let _ = reader.join();

        let outcome = match received {
            Ok(outcome) => outcome,
            Err(RecvTimeoutError::Timeout) => TrialOutcome::Timeout {
                elapsed: started.elapsed().as_secs_f64(),
            },
            Err(RecvTimeoutError::Disconnected) => TrialOutcome::Failure {
                message: format!("Worker exited ({status}) without reporting a result"),
            },
        };
        Ok(outcome)
    }
}
