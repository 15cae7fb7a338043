//! CLI argument definitions using clap
//!
//! Commands:
//! - movies-api serve [--host <host>] [--port <port>]
//! - movies-api validate <file> [--partial]
//! - movies-api seed

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// movies-api - In-memory movies REST API
#[derive(Parser, Debug)]
#[command(name = "movies-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides the PORT environment variable)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate a movie JSON file and print the normalized movie
    Validate {
        /// Path to the JSON file
        file: PathBuf,

        /// Treat the file as a partial update (every field optional)
        #[arg(long)]
        partial: bool,
    },

    /// Print the seed collection
    Seed,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
