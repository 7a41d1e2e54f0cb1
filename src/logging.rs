//! Diagnostic logging setup.
//!
//! The parent process logs into a file that is truncated on every run. Worker
//! processes log to stderr, which the parent inherits, and default to `warn`
//! so trial output does not flood the console.

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target};

use crate::error::{AppError, ErrorKind};

/// Overrides the `--log-file` path when set.
pub const LOG_PATH_ENV: &str = "BENCHMIKE_LOG";

/// Pick the log path: the environment override wins over the CLI value.
pub fn resolve_log_path(cli_path: &Path, env_value: Option<OsString>) -> PathBuf {
    match env_value {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => cli_path.to_path_buf(),
    }
}

/// Create (or truncate) the log file.
pub fn open_log_file(path: &Path) -> Result<File, AppError> {
    File::create(path).map_err(|e| {
        AppError::new(
            ErrorKind::Io,
            format!("Failed to create log file '{}': {e}", path.display()),
        )
    })
}

/// Route `log` records into a fresh log file at `path`.
///
/// `RUST_LOG` selects the level, `info` by default.
pub fn init_file_logger(path: &Path) -> Result<(), AppError> {
    let file = open_log_file(path)?;
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis();
    // A logger may already be installed when embedded in tests.
    let _ = builder.try_init();
    Ok(())
}

/// Logging for the hidden worker subcommand.
pub fn init_worker_logger() {
    let _ = Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override_wins_when_non_empty() {
        let cli = Path::new("benchmike.log");
        assert_eq!(resolve_log_path(cli, None), cli);
        assert_eq!(resolve_log_path(cli, Some(OsString::new())), cli);
        assert_eq!(
            resolve_log_path(cli, Some(OsString::from("/tmp/other.log"))),
            PathBuf::from("/tmp/other.log")
        );
    }

    #[test]
    fn log_file_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.log");
        std::fs::write(&path, "previous run\n").unwrap();

        drop(open_log_file(&path).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn unwritable_log_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_log_file(&dir.path().join("missing").join("x.log")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
