//! # studio-quote Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (stderr)
//! 3. Load configuration and build the engine
//! 4. Price the request, print JSON to stdout
//!
//! Errors go to stderr and set the process exit code.

use std::process::ExitCode;

use tracing::error;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let parsed = match studio_cli::parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e);
            return exit_code(&e);
        }
    };

    studio_cli::init_tracing();

    match studio_cli::run(&parsed) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(code = e.exit_code(), "Quote failed");
            eprintln!("error: {}", e);
            exit_code(&e)
        }
    }
}

fn exit_code(e: &studio_cli::CliError) -> ExitCode {
    ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
}
