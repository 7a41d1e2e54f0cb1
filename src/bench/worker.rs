//! Isolated worker: runs one trial inside its own process.
//!
//! The parent re-invokes this executable as `benchmike worker --target PATH
//! --size N --timeout SECS`. The worker:
//!
//! 1. arms a watchdog thread for `SECS`
//! 2. loads the target and runs `setup(N)` untimed, then `run(N)` timed
//! 3. reports exactly one `TrialOutcome` line on stdout
//!
//! The watchdog is preemptive: when it fires it reports `Timeout` and ends the
//! process, even if the main thread is stuck inside target code.

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::bench::protocol::TrialOutcome;
use crate::bench::target::{TargetError, TargetUnit};
use crate::error::{AppError, ErrorKind};

/// Exit status used when the watchdog ends the worker.
pub const WATCHDOG_EXIT_CODE: i32 = 124;

/// Lets only the first outcome through to stdout.
#[derive(Debug, Default)]
pub struct Reporter {
    sent: Mutex<bool>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `outcome` unless an earlier report already went out.
    ///
    /// Returns whether this call wrote the message.
    pub fn report(&self, outcome: &TrialOutcome) -> Result<bool, AppError> {
        let mut out = std::io::stdout().lock();
        self.report_to(&mut out, outcome)
    }

    pub fn report_to<W: Write>(&self, out: &mut W, outcome: &TrialOutcome) -> Result<bool, AppError> {
        let mut sent = self.sent.lock().unwrap_or_else(PoisonError::into_inner);
        if *sent {
            return Ok(false);
        }
        let line = outcome.to_line()?;
        writeln!(out, "{line}").and_then(|_| out.flush()).map_err(|e| {
            AppError::new(ErrorKind::Io, format!("Failed to write trial outcome: {e}"))
        })?;
        *sent = true;
        Ok(true)
    }
}

/// Execute one trial and report its outcome. Returns the reported outcome.
pub fn run_worker(target: &Path, size: u64, timeout_secs: u64) -> Result<TrialOutcome, AppError> {
    let reporter = Arc::new(Reporter::new());
    let started = Instant::now();
    arm_watchdog(Arc::clone(&reporter), started, Duration::from_secs(timeout_secs));

    let outcome = execute_trial(target, size);
    debug!("worker outcome for size {size}: {outcome:?}");
    reporter.report(&outcome)?;
    Ok(outcome)
}

/// Load the target and run it once. Never panics on target errors.
pub fn execute_trial(target: &Path, size: u64) -> TrialOutcome {
    let unit = match TargetUnit::load(target) {
        Ok(unit) => unit,
        Err(e) => {
            return TrialOutcome::Failure {
                message: e.message().to_string(),
            };
        }
    };

    match unit.run_trial(size) {
        Ok(timing) => TrialOutcome::Success {
            size,
            run_duration: timing.run.as_secs_f64(),
            total_duration: timing.total.as_secs_f64(),
        },
        Err(TargetError::MissingEntryPoints(message)) => {
            TrialOutcome::MissingEntryPoints { message }
        }
        Err(TargetError::Runtime(message)) => TrialOutcome::Failure { message },
    }
}

fn arm_watchdog(reporter: Arc<Reporter>, started: Instant, timeout: Duration) {
    thread::spawn(move || {
        thread::sleep(timeout);
        let outcome = TrialOutcome::Timeout {
            elapsed: started.elapsed().as_secs_f64(),
        };
        match reporter.report(&outcome) {
            Ok(true) => warn!("worker exceeded {}s, aborting", timeout.as_secs()),
            // The main thread reported first and is about to exit on its own.
            Ok(false) => return,
            Err(e) => warn!("{e}"),
        }
        std::process::exit(WATCHDOG_EXIT_CODE);
    });
}
