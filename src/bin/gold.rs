use std::process::ExitCode;

fn main() -> ExitCode {
    gold::cli::run()
}
