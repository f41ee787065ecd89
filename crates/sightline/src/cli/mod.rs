//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the sightline binary.

mod commands;
mod render;
mod run;
mod steps;

pub use commands::{Cli, Commands, OutputFormat};
pub use run::{RunOptions, run_wizard};
pub use steps::print_steps;
