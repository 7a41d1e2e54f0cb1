//! Worker → parent result message.
//!
//! The worker writes exactly one JSON line to stdout, e.g.
//!
//! ```text
//! {"outcome":"success","size":300,"run_duration":0.0301,"total_duration":0.0303}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// Outcome of one trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TrialOutcome {
    /// `run(size)` finished; durations in seconds.
    Success {
        size: u64,
        run_duration: f64,
        total_duration: f64,
    },
    /// The worker ran out of its time allotment.
    Timeout { elapsed: f64 },
    /// The target lacks `setup(size)` or `run(size)`.
    MissingEntryPoints { message: String },
    /// Any other failure in target code or in the worker itself.
    Failure { message: String },
}

impl TrialOutcome {
    pub fn to_line(&self) -> Result<String, AppError> {
        serde_json::to_string(self)
            .map_err(|e| AppError::new(ErrorKind::Io, format!("Failed to encode trial outcome: {e}")))
    }

    /// Parse one line; anything that is not a result message yields `None`.
    pub fn from_line(line: &str) -> Option<Self> {
        serde_json::from_str(line.trim()).ok()
    }
}
