//! Command-line interface for raster-dispatch
//!
//! Starts the interactive request loop against the configured tool server.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod repl;

use crate::client::{HttpTransport, RemoteClient};
use crate::config::{resolve_config, CliOverrides};
use repl::{run_interactive, Session};

/// Turn plain-language requests into raster analysis tool calls
#[derive(Parser)]
#[command(name = "raster-dispatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,

    /// Config file (TOML or YAML); auto-discovered in the working directory when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Tool server base URL, overrides config and environment
    #[arg(long, value_name = "URL")]
    server: Option<String>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let work_dir = std::env::current_dir().context("Failed to read working directory")?;
    let overrides = CliOverrides { server: cli.server };
    let config = resolve_config(&work_dir, cli.config.as_deref(), &overrides)?;

    let transport = HttpTransport::new(&config)?;
    let session = Session::new(RemoteClient::new(transport, config.request_id));
    run_interactive(session)
}

/// Wire the verbose flag to the tracing log level.
/// RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
