//! CLI command implementations

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::Logger;
use crate::schema::{validate_movie, validate_partial_movie};
use crate::store::seed_movies;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { host, port } => serve(host, port),
        Command::Validate { file, partial } => validate(&file, partial, &mut io::stdout()),
        Command::Seed => seed(&mut io::stdout()),
    }
}

/// Resolve configuration and run the server until shutdown.
///
/// Requests are handled on a single-threaded runtime.
pub fn serve(host: Option<String>, port: Option<u16>) -> CliResult<()> {
    let config = resolve_config(host, port)?;
    let server = HttpServer::with_config(config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::boot_failed(format!("Failed to start runtime: {}", e)))?;

    runtime.block_on(server.start()).map_err(|e| {
        let message = e.to_string();
        Logger::error("SERVER_FAILED", &[("error", message.as_str())]);
        CliError::from(e)
    })
}

/// Flags win over `PORT`; `PORT` wins over defaults
pub fn resolve_config(host: Option<String>, port: Option<u16>) -> CliResult<HttpServerConfig> {
    let mut config = match port {
        Some(port) => HttpServerConfig::with_port(port),
        None => HttpServerConfig::from_env()?,
    };
    if let Some(host) = host {
        config.host = host;
    }
    Ok(config)
}

/// Validate a movie file, writing the normalized movie or the violations
pub fn validate<W: Write>(path: &Path, partial: bool, out: &mut W) -> CliResult<()> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::io_error(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let input: Value = serde_json::from_str(&content)?;

    let normalized = if partial {
        validate_partial_movie(&input).map(serde_json::to_value)
    } else {
        validate_movie(&input).map(serde_json::to_value)
    };

    match normalized {
        Ok(value) => write_json(out, &value?),
        Err(errors) => {
            let count = errors.len();
            write_json(out, &serde_json::json!({ "error": errors }))?;
            Err(CliError::validation_failed(count))
        }
    }
}

/// Print the seed collection
pub fn seed<W: Write>(out: &mut W) -> CliResult<()> {
    let movies = seed_movies()?;
    write_json(out, &movies)
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
