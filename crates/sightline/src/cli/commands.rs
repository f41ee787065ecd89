//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Sightline - guided computer-vision annotation for fleet safety footage
#[derive(Parser, Debug)]
#[command(name = "sightline")]
#[command(about = "Guided computer-vision annotation for fleet safety footage", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the wizard steps in order
    Steps,

    /// Run an image or video through the whole wizard
    Run {
        /// Image or video file to analyze
        file: PathBuf,

        /// Declared MIME type (guessed from the extension when omitted)
        #[arg(long)]
        mime: Option<String>,

        /// Use canned data even when an API key is configured
        #[arg(long)]
        mock: bool,

        /// Wait for Enter before each step
        #[arg(long)]
        step_by_step: bool,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },
}

/// Output format for the run command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Step cards and outputs as they are produced
    Human,
    /// The final session view as JSON
    Json,
}
