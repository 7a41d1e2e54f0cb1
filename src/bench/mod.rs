//! Isolated benchmark runner.
//!
//! - `target`: loads a Rhai target and times one `setup`/`run` pass
//! - `protocol`: the one-line JSON message a worker sends back
//! - `worker`: the child-process side, with its watchdog
//! - `process`: the parent side, spawning and supervising workers
//! - `runner`: the budgeted loop producing the sample sequence

pub mod process;
pub mod protocol;
pub mod runner;
pub mod target;
pub mod worker;

pub use process::ProcessExecutor;
pub use protocol::TrialOutcome;
pub use runner::{CodeBenchmark, TrialExecutor};
pub use target::{TargetError, TargetUnit, TrialTiming};
pub use worker::run_worker;
