use catalog_viewer::cli;
use colored::*;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match cli::run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}
