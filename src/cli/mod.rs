//! Command-line parsing for benchmike.
//!
//! Parsing and validation live here; everything the flags drive lives in the
//! library modules.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::error::{AppError, ErrorKind};

pub const DEFAULT_TIMEOUT: u64 = 30;
pub const DEFAULT_TIME_FILE: &str = "time_source.rhai";
pub const DEFAULT_SIZE_FILE: &str = "size_source.rhai";
pub const DEFAULT_STEP: u64 = 100;
pub const DEFAULT_START: u64 = 100;
pub const DEFAULT_COUNT: u64 = 100;
pub const DEFAULT_LOG_FILE: &str = "benchmike.log";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "benchmike",
    version,
    about = "BenchMike - tool for estimating time complexity of code"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Benchmark a target script, estimate its complexity and write the artifacts.
    Run(RunArgs),
    /// Run one isolated trial and report it on stdout (internal).
    #[command(hide = true)]
    Worker(WorkerArgs),
}

/// Options for a benchmarking run.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Path to the .rhai file defining setup(size) and run(size).
    #[arg(value_name = "CODE")]
    pub code: PathBuf,

    /// Timeout in seconds for the whole run.
    #[arg(short = 't', long, default_value_t = DEFAULT_TIMEOUT)]
    pub timeout: u64,

    /// File where time(size) will be saved.
    #[arg(long, default_value = DEFAULT_TIME_FILE)]
    pub timefile: PathBuf,

    /// File where max_size(time) will be saved.
    #[arg(long, default_value = DEFAULT_SIZE_FILE)]
    pub sizefile: PathBuf,

    /// Size increment between trials.
    #[arg(long, default_value_t = DEFAULT_STEP, value_parser = clap::value_parser!(u64).range(1..))]
    pub step: u64,

    /// Initial problem size.
    #[arg(long, default_value_t = DEFAULT_START, value_parser = clap::value_parser!(u64).range(1..))]
    pub start: u64,

    /// Maximum number of trials.
    #[arg(long, default_value_t = DEFAULT_COUNT, value_parser = clap::value_parser!(u64).range(1..))]
    pub count: u64,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Diagnostic log file, truncated on every run.
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

impl RunArgs {
    /// Checks clap cannot express: files that must already exist.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.code.is_file() {
            return Err(AppError::new(
                ErrorKind::InvalidArgument,
                format!("Invalid code path '{}'", self.code.display()),
            ));
        }
        check_result_file(&self.timefile, DEFAULT_TIME_FILE)?;
        check_result_file(&self.sizefile, DEFAULT_SIZE_FILE)?;
        Ok(())
    }
}

/// A non-default result path must point at an existing file.
fn check_result_file(path: &Path, default: &str) -> Result<(), AppError> {
    if path != Path::new(default) && !path.is_file() {
        return Err(AppError::new(
            ErrorKind::InvalidArgument,
            format!("Invalid path for result file '{}'", path.display()),
        ));
    }
    Ok(())
}

/// Options for the hidden worker subcommand.
#[derive(Debug, Parser, Clone)]
pub struct WorkerArgs {
    #[arg(long)]
    pub target: PathBuf,

    #[arg(long)]
    pub size: u64,

    /// Seconds before the watchdog aborts the trial.
    #[arg(long)]
    pub timeout: u64,
}
