//! CLI module for movies-api
//!
//! Provides command-line interface for:
//! - serve: start the HTTP server
//! - validate: check a movie JSON file against the schema
//! - seed: print the startup collection

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{resolve_config, run_command, seed, serve, validate};
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}
