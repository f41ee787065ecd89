//! Sightline CLI binary.
//!
//! This binary drives one annotation wizard run from the command line:
//! - List the wizard steps
//! - Run an image or video through every step, live or in mock mode

use clap::Parser;
use std::process::ExitCode;

mod cli;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, RunOptions, print_steps, run_wizard};

    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    sightline::init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Steps => print_steps(),

        Commands::Run {
            file,
            mime,
            mock,
            step_by_step,
            format,
        } => {
            let options = RunOptions {
                mime,
                force_mock: mock,
                step_by_step,
                format,
            };
            if let Err(e) = run_wizard(&file, &options).await {
                eprintln!("Error: {}", e);
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
