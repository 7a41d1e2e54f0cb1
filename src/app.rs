//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up the diagnostic log
//! - runs benchmark + fit + code generation
//! - prints reports/plots
//! - serves the hidden worker subcommand

use clap::Parser;

use crate::cli::{Cli, Command, RunArgs, WorkerArgs};
use crate::domain::BenchConfig;
use crate::error::AppError;
use crate::logging;

pub mod pipeline;

/// Entry point for the `benchmike` binary.
pub fn run() -> Result<(), AppError> {
    // `benchmike <CODE> ...` behaves like `benchmike run <CODE> ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Worker(args) => handle_worker(args),
    }
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    args.validate()?;

    let log_path = logging::resolve_log_path(&args.log_file, std::env::var_os(logging::LOG_PATH_ENV));
    logging::init_file_logger(&log_path)?;

    let config = config_from_args(&args);
    let run = pipeline::run_pipeline(&config, None)?;

    println!(
        "{}",
        crate::report::format_run_summary(&config, &run.samples, &run.started_at)
    );
    println!("{}", crate::report::format_ranking(&run.selection));

    if config.plot {
        let factors = run.selection.factors();
        println!("Plotting {} best fit complexities", factors.len().min(2));
        let plot = crate::plot::render_ascii_plot(
            &run.samples,
            factors,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    for path in &run.written {
        println!("{}", crate::report::format_written(path));
    }

    Ok(())
}

fn handle_worker(args: WorkerArgs) -> Result<(), AppError> {
    logging::init_worker_logger();
    crate::bench::run_worker(&args.target, args.size, args.timeout)?;
    Ok(())
}

pub fn config_from_args(args: &RunArgs) -> BenchConfig {
    BenchConfig {
        target: args.code.clone(),
        timeout_secs: args.timeout,
        time_file: args.timefile.clone(),
        size_file: args.sizefile.clone(),
        step: args.step,
        start: args.start,
        count: usize::try_from(args.count).unwrap_or(usize::MAX),
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
    }
}

/// Rewrite argv so `benchmike <CODE>` defaults to `benchmike run <CODE>`.
///
/// Rules:
/// - `benchmike`                           -> unchanged (clap prints usage)
/// - `benchmike --help/--version/-h/help`  -> unchanged (top-level help/version)
/// - `benchmike run ...`, `benchmike worker ...` -> unchanged
/// - anything else                         -> `benchmike run ...`
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1) else {
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    let is_subcommand = matches!(arg1.as_str(), "run" | "worker");
    if is_top_level_help_or_version || is_subcommand {
        return argv;
    }

    argv.insert(1, "run".to_string());
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_code_path_becomes_run() {
        assert_eq!(
            rewrite_args(argv(&["benchmike", "code.rhai", "-t", "5"])),
            argv(&["benchmike", "run", "code.rhai", "-t", "5"])
        );
        assert_eq!(
            rewrite_args(argv(&["benchmike", "-t", "5", "code.rhai"])),
            argv(&["benchmike", "run", "-t", "5", "code.rhai"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for args in [
            argv(&["benchmike"]),
            argv(&["benchmike", "--help"]),
            argv(&["benchmike", "run", "code.rhai"]),
            argv(&["benchmike", "worker", "--target", "t.rhai", "--size", "1", "--timeout", "1"]),
        ] {
            assert_eq!(rewrite_args(args.clone()), args);
        }
    }

    #[test]
    fn config_mirrors_flags() {
        let cli = Cli::parse_from(rewrite_args(argv(&[
            "benchmike",
            "code.rhai",
            "--no-plot",
            "--count",
            "7",
            "--timefile",
            "t.rhai",
        ])));
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        let config = config_from_args(&args);
        assert_eq!(config.count, 7);
        assert!(!config.plot);
        assert_eq!(config.time_file, std::path::PathBuf::from("t.rhai"));
        assert_eq!(config.size_file, std::path::PathBuf::from("size_source.rhai"));
        assert_eq!(config.timeout_secs, 30);
    }
}
