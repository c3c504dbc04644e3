use clap::Parser;
use gencode::cli::{normalize_args, run_cli, Cli};
use gencode::logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    if let Err(e) = logging::init_logging(cli.verbose.then_some("debug")) {
        eprintln!("Warning: {e:#}");
    }

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
