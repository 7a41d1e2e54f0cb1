use std::process::ExitCode;

fn main() -> ExitCode {
    match benchmike::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            if err.is_benchmark_runtime() {
                eprintln!("An error occurred while benchmarking, exit");
            }
            ExitCode::from(err.exit_code())
        }
    }
}
