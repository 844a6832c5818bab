use clap::Parser;
use llmcontext::{Cli, Output};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Errors are always shown, even in quiet mode
            Output::new(false, false).error(&format!("{e:#}"));
            tracing::debug!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}
