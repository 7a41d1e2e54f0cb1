//! Process-level tests: these spawn the real `benchmike` binary as worker.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{Duration, Instant};

use benchmike::app::pipeline::run_pipeline;
use benchmike::bench::CodeBenchmark;
use benchmike::domain::{BenchConfig, Complexity};
use benchmike::error::ErrorKind;
use rhai::{Engine, Scope};

const BIN: &str = env!("CARGO_BIN_EXE_benchmike");

fn write_target(dir: &Path, name: &str, source: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, source).unwrap();
    path
}

fn config(dir: &Path, target: PathBuf, timeout_secs: u64, count: usize) -> BenchConfig {
    BenchConfig {
        target,
        timeout_secs,
        time_file: dir.join("time_source.rhai"),
        size_file: dir.join("size_source.rhai"),
        step: 100,
        start: 100,
        count,
        plot: false,
        plot_width: 80,
        plot_height: 20,
    }
}

fn benchmike(dir: &Path, args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("BENCHMIKE_LOG")
        .output()
        .unwrap()
}

#[test]
fn linear_sleep_is_estimated_as_linear() {
    let dir = tempfile::tempdir().unwrap();
    let target = write_target(
        dir.path(),
        "linear.rhai",
        "fn setup(size) {}\nfn run(size) { sleep(0.0001 * size); }",
    );
    let config = config(dir.path(), target, 5, 10);

    let out = run_pipeline(&config, Some(Path::new(BIN))).unwrap();

    let sizes: Vec<u64> = out.samples.iter().map(|s| s.size).collect();
    assert_eq!(sizes, (1..=10).map(|i| i * 100).collect::<Vec<_>>());

    // The verdict itself may be Constant: ranking uses the raw residual with an
    // absolute 1e-8 threshold, so sleep timings clean enough to fit a line with
    // SSE below 1e-8 put a constant fit first. That heuristic is kept on purpose.
    // The first fit that models growth must be linear either way.
    let shape = out
        .selection
        .factors()
        .iter()
        .find(|f| f.model != Complexity::Constant)
        .unwrap();
    assert_eq!(shape.model, Complexity::Linear);
    assert!((shape.a1 - 1e-4).abs() < 2e-5, "a1 = {}", shape.a1);

    let source = std::fs::read_to_string(&config.time_file).unwrap();
    let engine = Engine::new();
    let ast = engine.compile(&source).unwrap();
    let predicted: f64 = engine
        .call_fn(&mut Scope::new(), &ast, "time", (500.0_f64,))
        .unwrap();
    assert!((predicted - 0.05).abs() < 0.01, "time(500) = {predicted}");

    let source = std::fs::read_to_string(&config.size_file).unwrap();
    assert!(engine.compile(&source).is_ok());
}

#[test]
fn missing_entry_point_aborts_without_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    write_target(dir.path(), "setup_only.rhai", "fn setup(size) {}");

    let out = benchmike(dir.path(), &["setup_only.rhai", "-t", "5", "--count", "5"]);

    assert_eq!(out.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("run(size)"), "{stderr}");
    assert!(stderr.contains("An error occurred while benchmarking, exit"), "{stderr}");
    assert!(!dir.path().join("time_source.rhai").exists());
    assert!(!dir.path().join("size_source.rhai").exists());
}

#[test]
fn throwing_target_is_a_runtime_error() {
    let dir = tempfile::tempdir().unwrap();
    let target = write_target(
        dir.path(),
        "throws.rhai",
        "fn setup(size) {}\nfn run(size) { if size > 200 { throw \"too big\"; } }",
    );
    let config = config(dir.path(), target, 5, 10);

    let err = run_pipeline(&config, Some(Path::new(BIN))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Runtime);
    assert!(err.message().contains("too big"), "{}", err.message());
    assert!(!config.time_file.exists());
}

#[test]
fn infinite_loop_is_stopped_and_earlier_samples_kept() {
    let dir = tempfile::tempdir().unwrap();
    let target = write_target(
        dir.path(),
        "hangs.rhai",
        "fn setup(size) {}\nfn run(size) { if size > 100 { loop {} } }",
    );

    let started = Instant::now();
    let mut bench = CodeBenchmark::with_worker_program(&target, 2, BIN).unwrap();
    let samples = bench.run_benchmark(100, 100, 10).unwrap();

    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].size, 100);
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn parse_error_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    write_target(dir.path(), "broken.rhai", "fn run(size) {");

    let out = benchmike(dir.path(), &["broken.rhai", "-t", "5"]);
    assert_eq!(out.status.code(), Some(3));
    assert!(!dir.path().join("time_source.rhai").exists());
}

#[test]
fn missing_code_file_is_invalid_argument() {
    let dir = tempfile::tempdir().unwrap();
    let out = benchmike(dir.path(), &["nope.rhai"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid code path"));
}

#[test]
fn cli_run_reports_and_writes_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    write_target(
        dir.path(),
        "sorting.rhai",
        r#"
        fn setup(size) {
            this.items = [];
            for i in 0..size { this.items.push(size - i); }
        }
        fn run(size) { this.items.sort(); }
        "#,
    );
    std::fs::write(dir.path().join("benchmike.log"), "stale\n").unwrap();

    let out = benchmike(
        dir.path(),
        &["sorting.rhai", "-t", "10", "--count", "5", "--width", "40", "--height", "10"],
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(out.status.success(), "{stdout}\n{}", String::from_utf8_lossy(&out.stderr));

    assert!(stdout.contains("Printing complexities, from best fit to least"));
    assert!(stdout.contains("BenchMike's verdict: I'm almost sure it's "));
    assert!(stdout.contains("o samples"));
    assert!(stdout.contains("Successfully written to time_source.rhai"));
    assert!(stdout.contains("Successfully written to size_source.rhai"));
    assert!(dir.path().join("time_source.rhai").is_file());
    assert!(dir.path().join("size_source.rhai").is_file());

    let log = std::fs::read_to_string(dir.path().join("benchmike.log")).unwrap();
    assert!(!log.contains("stale"));
    assert!(log.contains("Started with path sorting.rhai, timeout 10"));
    assert!(log.contains("Finished benchmarking with 5 passes"));
    assert!(log.contains("Verdict: "));
}

#[test]
fn log_path_can_be_overridden_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    write_target(
        dir.path(),
        "quick.rhai",
        "fn setup(size) {}\nfn run(size) { sleep(0.00001 * size); }",
    );

    let out = Command::new(BIN)
        .args(["quick.rhai", "-t", "5", "--count", "4", "--no-plot"])
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env("BENCHMIKE_LOG", "custom.log")
        .output()
        .unwrap();

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(dir.path().join("custom.log").is_file());
    assert!(!dir.path().join("benchmike.log").exists());
    assert!(!String::from_utf8_lossy(&out.stdout).contains("Plotting"));
}
