use std::process::ExitCode;

fn main() -> ExitCode {
    lyra_cli::run()
}
