//! Loading and calling the benchmarked program unit.
//!
//! A target is a Rhai script that defines `setup(size)` and `run(size)`. Both
//! functions are called with the same `this` object map, so `setup` can leave
//! prepared data behind for `run`:
//!
//! ```text
//! fn setup(size) { this.items = []; for i in 0..size { this.items.push(size - i); } }
//! fn run(size) { this.items.sort(); }
//! ```
//!
//! Besides the Rhai standard library, targets may call `sleep(seconds)`.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, info};
use rhai::{AST, CallFnOptions, Dynamic, Engine, Map, Position, Scope};

use crate::error::{AppError, ErrorKind};

/// Required entry points and their arity.
pub const ENTRY_POINTS: [&str; 2] = ["setup", "run"];

/// Timings of one `setup` + `run` pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialTiming {
    /// Duration of `run` alone.
    pub run: Duration,
    /// Duration from just before `setup` to just after `run`.
    pub total: Duration,
}

/// Failure while executing target code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    MissingEntryPoints(String),
    Runtime(String),
}

/// A parsed target script.
pub struct TargetUnit {
    path: PathBuf,
    engine: Engine,
    ast: AST,
}

impl TargetUnit {
    /// Read and parse the script at `path`.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorKind::Load,
                format!("Failed to read target '{}': {e}", path.display()),
            )
        })?;
        Self::from_source(path, &source)
    }

    /// Parse `source`; `path` is only used in messages.
    pub fn from_source(path: &Path, source: &str) -> Result<Self, AppError> {
        let engine = target_engine();
        let ast = engine.compile(source).map_err(|e| {
            AppError::new(
                ErrorKind::Load,
                format!("Failed to parse target '{}': {e}", path.display()),
            )
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            engine,
            ast,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of required entry points that are absent or do not take exactly one argument.
    pub fn missing_entry_points(&self) -> Vec<&'static str> {
        ENTRY_POINTS
            .into_iter()
            .filter(|name| {
                !self
                    .ast
                    .iter_functions()
                    .any(|f| f.name == *name && f.params.len() == 1)
            })
            .collect()
    }

    /// Run top-level statements, then `setup(size)` untimed and `run(size)` timed.
    pub fn run_trial(&self, size: u64) -> Result<TrialTiming, TargetError> {
        let missing = self.missing_entry_points();
        if !missing.is_empty() {
            return Err(TargetError::MissingEntryPoints(format!(
                "Could not find {} in '{}'; the target must define setup(size) and run(size)",
                missing
                    .iter()
                    .map(|name| format!("{name}(size)"))
                    .collect::<Vec<_>>()
                    .join(" and "),
                self.path.display()
            )));
        }

        let size = rhai::INT::try_from(size)
            .map_err(|_| TargetError::Runtime(format!("size {size} does not fit a script integer")))?;

        let mut scope = Scope::new();
        self.engine
            .run_ast_with_scope(&mut scope, &self.ast)
            .map_err(|e| TargetError::Runtime(e.to_string()))?;

        let mut this = Dynamic::from(Map::new());

        let whole_start = Instant::now();
        self.call_entry_point(&mut scope, &mut this, "setup", size)?;
        let run_start = Instant::now();
        self.call_entry_point(&mut scope, &mut this, "run", size)?;
        let end = Instant::now();

        Ok(TrialTiming {
            run: end - run_start,
            total: end - whole_start,
        })
    }

    fn call_entry_point(
        &self,
        scope: &mut Scope,
        this: &mut Dynamic,
        name: &str,
        size: rhai::INT,
    ) -> Result<(), TargetError> {
        let options = CallFnOptions::new().eval_ast(false).bind_this_ptr(this);
        self.engine
            .call_fn_with_options::<Dynamic>(options, scope, &self.ast, name, (size,))
            .map(|_| ())
            .map_err(|e| TargetError::Runtime(format!("{name}({size}) failed: {e}")))
    }
}

/// Engine shared by targets and generated artifacts.
///
/// Script output is routed to the log so it never mixes with the worker's
/// result channel on stdout.
pub fn target_engine() -> Engine {
    let mut engine = Engine::new();
    engine.register_fn("sleep", |seconds: rhai::FLOAT| sleep_secs(seconds));
    engine.register_fn("sleep", |seconds: rhai::INT| sleep_secs(seconds as rhai::FLOAT));
    engine.on_print(|text| info!("target: {text}"));
    engine.on_debug(|text, source, pos: Position| {
        debug!("target debug [{}] {pos}: {text}", source.unwrap_or("-"));
    });
    engine
}

fn sleep_secs(seconds: f64) {
    if seconds.is_nan() || seconds <= 0.0 {
        return;
    }
    std::thread::sleep(Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX));
}
